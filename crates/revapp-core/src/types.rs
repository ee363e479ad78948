//! Core type definitions

use serde::{Deserialize, Serialize};

/// Default Heroku Platform API endpoint
pub const DEFAULT_API_URL: &str = "https://api.heroku.com";

/// Requested review app action, taken from the `action` step input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a review app for the pull request
    Create,
    /// Delete the pull request's review app, if one exists
    Destroy,
    /// Anything else, including an unset input. Nothing is performed.
    Other(String),
}

impl Action {
    /// Parse the raw input. Matching is exact and case-sensitive.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "create" => Action::Create,
            "destroy" => Action::Destroy,
            other => Action::Other(other.to_string()),
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &str {
        match self {
            Action::Create => "create",
            Action::Destroy => "destroy",
            Action::Other(raw) => raw,
        }
    }
}

/// Everything a run needs to know about the triggering pull request.
///
/// Built once at the entry point and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Pull request number
    pub pull_request_number: u64,
    /// Head branch name (`pull_request.head.ref`)
    pub head_branch: String,
    /// Commit the review app is built from
    pub head_commit_sha: String,
    /// Whether the head repository is a fork
    pub is_fork: bool,
    /// Repository web URL (`repository.html_url`)
    pub repository_url: String,
    /// Requested action
    pub requested_action: Action,
}

impl InvocationContext {
    /// Tarball URL Heroku fetches the source from: `<repo_url>/tarball/<branch>`
    pub fn tarball_url(&self) -> String {
        format!("{}/tarball/{}", self.repository_url, self.head_branch)
    }
}

/// Connection settings for the Heroku API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// API base URL
    pub api_url: String,
    /// Bearer token (`HEROKU_API_TOKEN`)
    pub token: Option<String>,
    /// Target pipeline (`HEROKU_PIPELINE_ID`)
    pub pipeline_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            pipeline_id: None,
        }
    }
}

/// The two review app fields this tool reads. Everything else Heroku
/// returns is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewApp {
    /// Review app identifier
    pub id: String,
    /// Pull request the review app was built for (null for manual apps)
    #[serde(default)]
    pub pr_number: Option<u64>,
}

/// Body of `POST /review-apps`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReviewApp {
    /// Branch the review app tracks
    pub branch: String,
    /// Pipeline id; left out of the body when unset so Heroku reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,
    /// Where Heroku downloads the source from
    pub source_blob: SourceBlob,
    /// Pull request number
    pub pr_number: u64,
    /// Config vars set on the new app
    pub environment: ReviewAppEnvironment,
}

/// Source tarball location and the commit it represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceBlob {
    /// Tarball URL
    pub url: String,
    /// Commit SHA
    pub version: String,
}

/// Config vars injected into the review app
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewAppEnvironment {
    /// Repository web URL
    #[serde(rename = "GIT_REPO_URL")]
    pub git_repo_url: String,
}

impl CreateReviewApp {
    /// Build the create request for a pull request context
    pub fn for_context(ctx: &InvocationContext, pipeline: Option<&str>) -> Self {
        Self {
            branch: ctx.head_branch.clone(),
            pipeline: pipeline.map(str::to_string),
            source_blob: SourceBlob {
                url: ctx.tarball_url(),
                version: ctx.head_commit_sha.clone(),
            },
            pr_number: ctx.pull_request_number,
            environment: ReviewAppEnvironment {
                git_repo_url: ctx.repository_url.clone(),
            },
        }
    }
}
