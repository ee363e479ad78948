#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Context;
use clap::Parser;
use revapp_core::output::{self, LogFormat};
use revapp_core::types::DEFAULT_API_URL;
use revapp_core::{event, InvocationContext, Settings};
use std::path::PathBuf;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "revapp", version, about = "Heroku review apps for pull requests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create or destroy the review app for the triggering pull request
    Run(RunArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Action to perform: create or destroy (anything else does nothing)
    #[arg(long, env = "INPUT_ACTION", default_value = "")]
    action: String,

    /// Heroku API token
    #[arg(long, env = "HEROKU_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Heroku pipeline id review apps belong to
    #[arg(long, env = "HEROKU_PIPELINE_ID")]
    pipeline_id: Option<String>,

    /// Heroku Platform API base URL
    #[arg(long, env = "HEROKU_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Path to the GitHub event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Commit the review app is built from (default: pull request head)
    #[arg(long, env = "GITHUB_SHA")]
    sha: Option<String>,

    /// Log format: gha, text (default: auto-detect)
    #[arg(long, env = "REVAPP_LOG_FORMAT")]
    log_format: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Run(args) => run(args),
    };
    std::process::exit(code);
}

/// Filter empty string from Option (GHA sets "" for unset inputs and secrets)
fn clean_opt(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

fn resolve(args: &RunArgs) -> anyhow::Result<InvocationContext> {
    let event_path = args
        .event_path
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
        .context("GITHUB_EVENT_PATH is not set; run inside a pull_request workflow")?;

    let ctx = event::resolve_context(event_path, args.sha.as_deref(), &args.action)
        .with_context(|| format!("resolve pull request from {}", event_path.display()))?;
    Ok(ctx)
}

fn run(args: RunArgs) -> i32 {
    output::init(LogFormat::detect(args.log_format.as_deref()));

    let ctx = match resolve(&args) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };

    let api_url = if args.api_url.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        args.api_url
    };
    let settings = Settings {
        api_url,
        token: clean_opt(args.token),
        pipeline_id: clean_opt(args.pipeline_id),
    };

    let outcome = match revapp_core::run_blocking(&ctx, &settings) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("failed to create runtime: {e}");
            return 1;
        }
    };
    debug!(?outcome, "run finished");

    // Failures after context resolution are reported in the log only.
    0
}
