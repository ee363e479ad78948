//! # revapp core
//!
//! Creates and destroys Heroku review apps for pull requests from inside a
//! GitHub Actions job.
//!
//! A run resolves an [`InvocationContext`] from the event payload, skips
//! pull requests from forks, connects to the Heroku Platform API and then
//! dispatches on the requested [`Action`]. Every failure after context
//! resolution is logged and swallowed; the returned [`Outcome`] tells the
//! caller which exit point was reached.
//!
//! ## Example
//!
//! ```no_run
//! use revapp_core::{event, run, Settings};
//!
//! # async fn example() -> revapp_core::Result<()> {
//! let ctx = event::resolve_context("/github/workflow/event.json", None, "destroy")?;
//! let settings = Settings {
//!     token: Some("token".to_string()),
//!     pipeline_id: Some("pipeline-id".to_string()),
//!     ..Default::default()
//! };
//!
//! let outcome = run(&ctx, &settings).await;
//! println!("completed: {}", outcome.completed());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod coordination;
pub mod error;
pub mod event;
pub mod http;
pub mod output;
pub mod traits;
pub mod types;

pub use coordination::{Outcome, ReviewAppController};
pub use error::{Error, ErrorKind, Result};
pub use http::HerokuClient;
pub use traits::ReviewAppApi;
pub use types::{Action, InvocationContext, ReviewApp, Settings};

use tracing::{debug, error};

/// Run the requested action for a pull request.
///
/// Never fails: fork pull requests are skipped, a client that cannot be
/// built ends the run with [`Outcome::Unconfigured`], and API errors are
/// logged by the controller.
pub async fn run(ctx: &InvocationContext, settings: &Settings) -> Outcome {
    if coordination::guard_fork(ctx) {
        return Outcome::SkippedFork;
    }

    debug!("connecting to heroku");
    let client = match HerokuClient::connect(&settings.api_url, settings.token.as_deref()) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e.to_json());
            error!("Couldn't connect to Heroku, make sure the HEROKU_API_TOKEN is set");
            return Outcome::Unconfigured;
        }
    };

    ReviewAppController::new(client, settings.pipeline_id.clone())
        .dispatch(ctx)
        .await
}

/// Synchronous variant of [`run`]
///
/// This creates a single-threaded Tokio runtime and blocks on the async
/// version. Only runtime construction can fail.
pub fn run_blocking(ctx: &InvocationContext, settings: &Settings) -> Result<Outcome> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(run(ctx, settings)))
}
