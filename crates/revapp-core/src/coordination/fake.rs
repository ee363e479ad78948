//! In-memory review app API that records every call

use crate::error::{Error, Result};
use crate::traits::ReviewAppApi;
use crate::types::{CreateReviewApp, ReviewApp};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List(String),
    Create(CreateReviewApp),
    Delete(String),
}

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    apps: Mutex<Vec<ReviewApp>>,
    calls: Mutex<Vec<Call>>,
    fail_list: bool,
    fail_create: bool,
    fail_delete: bool,
}

fn server_error() -> Error {
    Error::Api {
        status: 500,
        id: Some("internal_server_error".to_string()),
        message: "Internal server error.".to_string(),
    }
}

impl FakeApi {
    pub(crate) fn with_apps(apps: Vec<ReviewApp>) -> Self {
        Self {
            apps: Mutex::new(apps),
            ..Default::default()
        }
    }

    pub(crate) fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub(crate) fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub(crate) fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub(crate) fn remaining(&self) -> Vec<ReviewApp> {
        self.apps.lock().clone()
    }
}

impl ReviewAppApi for FakeApi {
    async fn list_review_apps(&self, pipeline_id: &str) -> Result<Vec<ReviewApp>> {
        self.calls.lock().push(Call::List(pipeline_id.to_string()));
        if self.fail_list {
            return Err(server_error());
        }
        Ok(self.apps.lock().clone())
    }

    async fn create_review_app(&self, request: &CreateReviewApp) -> Result<ReviewApp> {
        self.calls.lock().push(Call::Create(request.clone()));
        if self.fail_create {
            return Err(server_error());
        }
        let app = ReviewApp {
            id: format!("created-{}", request.pr_number),
            pr_number: Some(request.pr_number),
        };
        self.apps.lock().push(app.clone());
        Ok(app)
    }

    async fn delete_review_app(&self, id: &str) -> Result<()> {
        self.calls.lock().push(Call::Delete(id.to_string()));
        if self.fail_delete {
            return Err(server_error());
        }
        let mut apps = self.apps.lock();
        let before = apps.len();
        apps.retain(|app| app.id != id);
        if apps.len() == before {
            return Err(Error::Api {
                status: 404,
                id: Some("not_found".to_string()),
                message: "Couldn't find that review app.".to_string(),
            });
        }
        Ok(())
    }
}
