//! HerokuClient against a mock Platform API

use assert_matches::assert_matches;
use revapp_core::types::CreateReviewApp;
use revapp_core::{Action, Error, ErrorKind, HerokuClient, InvocationContext, ReviewAppApi};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "HRKU-test-token";

fn client(server: &MockServer) -> HerokuClient {
    HerokuClient::connect(&server.uri(), Some(TOKEN)).expect("client builds")
}

fn context() -> InvocationContext {
    InvocationContext {
        pull_request_number: 42,
        head_branch: "feature-x".to_string(),
        head_commit_sha: "abc123".to_string(),
        is_fork: false,
        repository_url: "https://example.com/org/repo".to_string(),
        requested_action: Action::Create,
    }
}

#[tokio::test]
async fn test_list_review_apps_sends_platform_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pipelines/pipe-1/review-apps"))
        .and(header("authorization", "Bearer HRKU-test-token"))
        .and(header("accept", "application/vnd.heroku+json; version=3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "rv1", "pr_number": 42, "status": "created", "branch": "feature-x" },
            { "id": "rv2", "pr_number": null, "status": "creating" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let apps = client(&server).list_review_apps("pipe-1").await.unwrap();

    assert_eq!(apps.len(), 2);
    assert_eq!(apps[0].id, "rv1");
    assert_eq!(apps[0].pr_number, Some(42));
    assert_eq!(apps[1].pr_number, None);
}

#[tokio::test]
async fn test_create_review_app_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/review-apps"))
        .and(body_json(json!({
            "branch": "feature-x",
            "pipeline": "pipe-1",
            "source_blob": {
                "url": "https://example.com/org/repo/tarball/feature-x",
                "version": "abc123"
            },
            "pr_number": 42,
            "environment": { "GIT_REPO_URL": "https://example.com/org/repo" }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": "rv-new", "pr_number": 42, "status": "pending" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateReviewApp::for_context(&context(), Some("pipe-1"));
    let app = client(&server).create_review_app(&request).await.unwrap();

    assert_eq!(app.id, "rv-new");
}

#[tokio::test]
async fn test_delete_review_app() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/review-apps/rv1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "rv1" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_review_app("rv1").await.unwrap();
}

#[tokio::test]
async fn test_error_body_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/review-apps/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "id": "not_found",
            "message": "Couldn't find that review app."
        })))
        .mount(&server)
        .await;

    let err = client(&server).delete_review_app("missing").await.unwrap_err();

    assert_matches!(
        err,
        Error::Api { status: 404, ref id, ref message }
            if id.as_deref() == Some("not_found") && message == "Couldn't find that review app."
    );
}

#[tokio::test]
async fn test_error_without_body_uses_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).list_review_apps("pipe-1").await.unwrap_err();

    assert_matches!(err, Error::Api { status: 503, id: None, ref message } if message == "Service Unavailable");
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("RateLimit-Remaining", "0")
                .set_body_json(json!({ "id": "rate_limit", "message": "Your account reached the API rate limit" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).list_review_apps("pipe-1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert!(err.message().contains("Remaining: 0"));
}

#[tokio::test]
async fn test_malformed_list_is_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server).list_review_apps("pipe-1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Json);
}

#[tokio::test]
async fn test_unreachable_host_is_http_error() {
    // Nothing listens on the discard port
    let client = HerokuClient::connect("http://127.0.0.1:9", Some(TOKEN)).unwrap();

    let err = client.list_review_apps("pipe-1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Http);
    assert!(!err.to_string().contains(TOKEN));
}
