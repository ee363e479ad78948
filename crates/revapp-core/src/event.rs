//! GitHub event payload parsing
//!
//! Only the handful of fields needed to build an [`InvocationContext`] are
//! deserialized; the rest of the payload is skipped.

use crate::error::{Error, Result};
use crate::types::{Action, InvocationContext};
use serde::Deserialize;
use std::path::Path;

/// Subset of a `pull_request` webhook payload
#[derive(Debug, Deserialize)]
pub struct EventPayload {
    pull_request: Option<PullRequest>,
    repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    number: u64,
    head: PullRequestHead,
}

#[derive(Debug, Deserialize)]
struct PullRequestHead {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: Option<String>,
    /// Null when the head repository has been deleted
    repo: Option<HeadRepository>,
}

#[derive(Debug, Deserialize)]
struct HeadRepository {
    #[serde(default)]
    fork: bool,
}

#[derive(Debug, Deserialize)]
struct Repository {
    html_url: String,
}

impl EventPayload {
    /// Parse a payload from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::EventParse(format!("invalid event payload: {}", e)))
    }

    /// Read and parse the payload file the runner points `GITHUB_EVENT_PATH` at
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_slice(&bytes)
    }

    /// Build the invocation context.
    ///
    /// `sha` is the runner's `GITHUB_SHA`; when absent or empty the pull
    /// request head SHA from the payload is used instead.
    pub fn into_context(self, sha: Option<&str>, action: &str) -> Result<InvocationContext> {
        let pr = self.pull_request.ok_or_else(|| {
            Error::EventParse("event payload has no pull_request; run on pull_request events".into())
        })?;

        let repository_url = self
            .repository
            .map(|r| r.html_url)
            .ok_or_else(|| Error::EventParse("event payload has no repository.html_url".into()))?;

        let head_commit_sha = sha
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or(pr.head.sha)
            .ok_or_else(|| Error::EventParse("no commit SHA in GITHUB_SHA or event payload".into()))?;

        // A deleted head repository can only have been a fork.
        let is_fork = pr.head.repo.map_or(true, |r| r.fork);

        Ok(InvocationContext {
            pull_request_number: pr.number,
            head_branch: pr.head.ref_name,
            head_commit_sha,
            is_fork,
            repository_url,
            requested_action: Action::parse(action),
        })
    }
}

/// Resolve the invocation context from the event file, commit SHA and action input
pub fn resolve_context<P: AsRef<Path>>(
    event_path: P,
    sha: Option<&str>,
    action: &str,
) -> Result<InvocationContext> {
    EventPayload::from_path(event_path)?.into_context(sha, action)
}
