//! Integration tests for the backend API client.
//!
//! These tests verify the HTTP contract: paths, methods, request bodies,
//! credential header attachment, and status-code mapping.

use std::time::Duration;

use dnsrelay_console::api::{ApiClient, ApiError, API_TOKEN_HEADER};
use dnsrelay_console::session::Session;
use dnsrelay_console::types::Platform;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(2))
}

fn status_body(logged_in: bool) -> serde_json::Value {
    serde_json::json!({
        "logged_in": logged_in,
        "has_admin_password": true,
        "has_webhooks": false,
        "setup_complete": false,
        "webhooks": []
    })
}

// =============================================================================
// Contract Tests
// =============================================================================

#[tokio::test]
async fn status_attaches_session_credential() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .and(header(API_TOKEN_HEADER, "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(true)))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::with_token("tok-1");
    let status = client(&server).status(&session).await.unwrap();
    assert!(status.logged_in);
}

#[tokio::test]
async fn anonymous_session_sends_no_credential_header() {
    let server = MockServer::start().await;

    // A request carrying the header would match this mock and fail the test.
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .and(header_exists(API_TOKEN_HEADER))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(false)))
        .mount(&server)
        .await;

    let session = Session::anonymous();
    let status = client(&server).status(&session).await.unwrap();
    assert!(!status.logged_in);
}

#[tokio::test]
async fn init_returns_api_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/init"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"api_token": "tok-xyz"})),
        )
        .mount(&server)
        .await;

    let resp = client(&server).init().await.unwrap();
    assert_eq!(resp.api_token, "tok-xyz");
}

#[tokio::test]
async fn gui_status_decodes_disabled_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/gui-status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"gui_disabled": true})),
        )
        .mount(&server)
        .await;

    let resp = client(&server).gui_status().await.unwrap();
    assert!(resp.gui_disabled);
}

#[tokio::test]
async fn login_posts_password_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(serde_json::json!({"password": "abc123"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::with_token("tok-1");
    client(&server).login(&session, "abc123").await.unwrap();
}

#[tokio::test]
async fn rejected_login_maps_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = Session::with_token("tok-1");
    let err = client(&server).login(&session, "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn missing_credential_rejection_is_indistinguishable_from_login_failure() {
    let server = MockServer::start().await;

    // The backend answers 403 when the credential is absent or wrong; the
    // client maps both to the same error as a 401.
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client(&server)
        .status(&Session::anonymous())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn create_webhook_posts_platform_and_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/setup"))
        .and(body_json(serde_json::json!({
            "webhook_url": "https://hooks.slack.example/X",
            "platform": "slack"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Slack URL set and test message sent.",
            "token": "new-token",
            "waiting_for_test": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::with_token("tok-1");
    let resp = client(&server)
        .create_webhook(&session, Platform::Slack, "https://hooks.slack.example/X")
        .await
        .unwrap();

    assert_eq!(resp.token, "new-token");
    assert!(resp.waiting_for_test);
}

#[tokio::test]
async fn delete_webhook_targets_token_path() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/webhooks/tok-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::with_token("tok-1");
    client(&server)
        .delete_webhook(&session, "tok-1")
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_unknown_webhook_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/webhooks/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let session = Session::with_token("tok-1");
    let err = client(&server)
        .delete_webhook(&session, "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[tokio::test]
async fn server_errors_carry_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server)
        .status(&Session::with_token("tok-1"))
        .await
        .unwrap_err();
    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}
