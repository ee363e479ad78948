//! Review app dispatch: create, destroy, or nothing

use crate::error::{Error, Result};
use crate::traits::ReviewAppApi;
use crate::types::{Action, CreateReviewApp, InvocationContext, ReviewApp};
use tracing::{debug, error, info};

/// Where a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Pull request came from a fork, nothing was contacted
    SkippedFork,
    /// No usable client could be built from the token
    Unconfigured,
    /// Review app creation was accepted
    Created {
        /// New review app id
        id: String,
    },
    /// Creation failed; the error was logged
    CreateFailed,
    /// The pull request's review app was deleted
    Destroyed {
        /// Deleted review app id
        id: String,
    },
    /// No review app belongs to the pull request
    NothingToDestroy,
    /// Listing or deleting failed; the error was logged
    DestroyFailed,
    /// The action input was neither `create` nor `destroy`
    NoAction,
}

impl Outcome {
    /// Whether the run reached the final "Action completed" line.
    ///
    /// A failed destroy returns early, unlike a failed create.
    pub const fn completed(&self) -> bool {
        !matches!(
            self,
            Outcome::SkippedFork | Outcome::Unconfigured | Outcome::DestroyFailed
        )
    }
}

/// Returns true (and logs why) when the run must stop because the pull
/// request comes from a fork. Fork builds never see deployment credentials.
pub fn guard_fork(ctx: &InvocationContext) -> bool {
    if ctx.is_fork {
        info!("PRs from forked repos can't trigger this action");
    }
    ctx.is_fork
}

/// First review app built for `pr_number`, in the order Heroku returned them
pub fn find_review_app(apps: &[ReviewApp], pr_number: u64) -> Option<&ReviewApp> {
    apps.iter().find(|app| app.pr_number == Some(pr_number))
}

/// Drives one action against the review app API
pub struct ReviewAppController<A> {
    api: A,
    pipeline_id: Option<String>,
}

impl<A: ReviewAppApi> ReviewAppController<A> {
    /// Create a controller for a pipeline
    pub fn new(api: A, pipeline_id: Option<String>) -> Self {
        Self { api, pipeline_id }
    }

    /// Borrow the underlying API
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run the requested action and log completion.
    ///
    /// Errors never escape: create failures are logged and the run still
    /// completes, destroy failures are logged and the run stops short of the
    /// completion line.
    pub async fn dispatch(&self, ctx: &InvocationContext) -> Outcome {
        let outcome = match &ctx.requested_action {
            Action::Destroy => {
                info!("Fetching review app list");
                match self.destroy(ctx).await {
                    Ok(Some(id)) => Outcome::Destroyed { id },
                    Ok(None) => Outcome::NothingToDestroy,
                    Err(e) => {
                        error!("{}", e.to_json());
                        return Outcome::DestroyFailed;
                    }
                }
            }
            Action::Create => match self.create(ctx).await {
                Ok(app) => Outcome::Created { id: app.id },
                Err(e) => {
                    error!("{}", e.to_json());
                    Outcome::CreateFailed
                }
            },
            Action::Other(_) => {
                debug!(
                    action = %ctx.requested_action.as_str(),
                    "Invalid action, no action was performed, use one of 'create' or 'destroy'"
                );
                Outcome::NoAction
            }
        };

        info!("Action completed");
        outcome
    }

    async fn create(&self, ctx: &InvocationContext) -> Result<ReviewApp> {
        info!("Creating review app");
        let request = CreateReviewApp::for_context(ctx, self.pipeline_id.as_deref());
        let app = self.api.create_review_app(&request).await?;
        info!(id = %app.id, "Created review app");
        Ok(app)
    }

    async fn destroy(&self, ctx: &InvocationContext) -> Result<Option<String>> {
        let pipeline_id = self
            .pipeline_id
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::Config("HEROKU_PIPELINE_ID is not set".to_string()))?;

        let apps = self.api.list_review_apps(pipeline_id).await?;
        let Some(app) = find_review_app(&apps, ctx.pull_request_number) else {
            return Ok(None);
        };

        info!("Deleting review app");
        self.api.delete_review_app(&app.id).await?;
        info!(id = %app.id, "Review app deleted");
        Ok(Some(app.id.clone()))
    }
}
