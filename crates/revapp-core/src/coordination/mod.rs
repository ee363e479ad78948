//! Main coordination logic

pub mod controller;

#[cfg(test)]
pub(crate) mod fake;

pub use controller::{find_review_app, guard_fork, Outcome, ReviewAppController};
