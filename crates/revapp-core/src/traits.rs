//! Trait seam between the controller and the Heroku API

use crate::error::Result;
use crate::types::{CreateReviewApp, ReviewApp};
use std::future::Future;

/// The three review app calls the controller makes.
///
/// Static dispatch only; the controller is generic over the implementation.
pub trait ReviewAppApi {
    /// `GET /pipelines/{pipeline_id}/review-apps`
    fn list_review_apps(
        &self,
        pipeline_id: &str,
    ) -> impl Future<Output = Result<Vec<ReviewApp>>> + Send;

    /// `POST /review-apps`
    fn create_review_app(
        &self,
        request: &CreateReviewApp,
    ) -> impl Future<Output = Result<ReviewApp>> + Send;

    /// `DELETE /review-apps/{id}`
    fn delete_review_app(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}
