//! Heroku Platform API client scoped to review apps

use crate::error::{Error, Result};
use crate::traits::ReviewAppApi;
use crate::types::{CreateReviewApp, ReviewApp};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;

/// Media type selecting version 3 of the Platform API
const HEROKU_ACCEPT: &str = "application/vnd.heroku+json; version=3";

/// Heroku error body (`{"id": "not_found", "message": "..."}`)
#[derive(Debug, Default, Deserialize)]
struct HerokuErrorBody {
    id: Option<String>,
    message: Option<String>,
}

/// Heroku API client for review app lifecycle calls
pub struct HerokuClient {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for HerokuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HerokuClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl HerokuClient {
    /// Build an authenticated client.
    ///
    /// Fails when the token is missing or empty, is not a valid header value,
    /// or the TLS backend cannot be initialized. No request is sent.
    pub fn connect(base_url: &str, token: Option<&str>) -> Result<Self> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Config("HEROKU_API_TOKEN is not set".to_string()))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            Error::Config(
                "HEROKU_API_TOKEN contains characters not allowed in an HTTP header".to_string(),
            )
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(HEROKU_ACCEPT));
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .user_agent(concat!("revapp/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Map non-success responses to errors
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let remaining = response
                .headers()
                .get("ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("0");

            return Err(Error::RateLimited(format!(
                "Heroku API rate limit exceeded. Remaining: {}",
                remaining
            )));
        }

        let body: HerokuErrorBody = response.json().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            id: body.id,
            message: body.message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            }),
        })
    }
}

impl ReviewAppApi for HerokuClient {
    async fn list_review_apps(&self, pipeline_id: &str) -> Result<Vec<ReviewApp>> {
        let url = format!("{}/pipelines/{}/review-apps", self.base_url, pipeline_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to list review apps: {}", e)))?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Json(format!("Failed to parse review app list: {}", e)))
    }

    async fn create_review_app(&self, request: &CreateReviewApp) -> Result<ReviewApp> {
        let url = format!("{}/review-apps", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to create review app: {}", e)))?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Json(format!("Failed to parse created review app: {}", e)))
    }

    async fn delete_review_app(&self, id: &str) -> Result<()> {
        let url = format!("{}/review-apps/{}", self.base_url, id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to delete review app: {}", e)))?;

        Self::check(response).await?;
        Ok(())
    }
}
