//! Integration tests for the verification poller lifecycle.
//!
//! These tests verify the three guarantees the setup flow depends on: the
//! poller stops after the backend reports completion (with at most one
//! completion signal), transient poll failures are swallowed, and
//! cancellation prevents any further requests.

use std::sync::Arc;
use std::time::Duration;

use dnsrelay_console::api::ApiClient;
use dnsrelay_console::poller::{PollEvent, VerificationPoller};
use dnsrelay_console::session::Session;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

/// Short interval so tests complete quickly.
const TEST_INTERVAL: Duration = Duration::from_millis(30);

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(2))
}

fn status_body(setup_complete: bool) -> serde_json::Value {
    serde_json::json!({
        "logged_in": true,
        "has_admin_password": true,
        "has_webhooks": true,
        "setup_complete": setup_complete,
        "webhooks": []
    })
}

async fn status_request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/api/status")
        .count()
}

// =============================================================================
// Scenario D: polling stops at completion
// =============================================================================

#[tokio::test]
async fn polls_until_complete_then_stops() {
    let server = MockServer::start().await;

    // Three incomplete snapshots, then completion.
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(false)))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(true)))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::channel(16);
    let _poller = VerificationPoller::spawn(
        client(&server),
        Arc::new(Session::with_token("tok-1")),
        TEST_INTERVAL,
        tx,
    );

    let mut status_events = 0;
    let mut completions = 0;
    while let Some(event) = rx.recv().await {
        match event {
            PollEvent::Status(status) => {
                assert!(!status.setup_complete);
                status_events += 1;
            }
            PollEvent::SetupComplete(status) => {
                assert!(status.setup_complete);
                completions += 1;
            }
        }
    }

    // The channel closed because the task stopped on its own after the
    // fourth poll: exactly one completion signal, no polls afterwards.
    assert_eq!(status_events, 3);
    assert_eq!(completions, 1);
    assert_eq!(status_request_count(&server).await, 4);

    // No timer survives completion.
    tokio::time::sleep(TEST_INTERVAL * 5).await;
    assert_eq!(status_request_count(&server).await, 4);
}

#[tokio::test]
async fn completion_is_signaled_at_most_once() {
    let server = MockServer::start().await;

    // Every poll reports completion; only the first may produce a signal.
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(true)))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::channel(16);
    let _poller = VerificationPoller::spawn(
        client(&server),
        Arc::new(Session::with_token("tok-1")),
        TEST_INTERVAL,
        tx,
    );

    let mut completions = 0;
    while let Some(event) = rx.recv().await {
        if matches!(event, PollEvent::SetupComplete(_)) {
            completions += 1;
        }
    }

    assert_eq!(completions, 1);
    assert_eq!(status_request_count(&server).await, 1);
}

// =============================================================================
// Transient failures
// =============================================================================

#[tokio::test]
async fn failed_poll_is_swallowed_and_polling_continues() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(true)))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::channel(16);
    let _poller = VerificationPoller::spawn(
        client(&server),
        Arc::new(Session::with_token("tok-1")),
        TEST_INTERVAL,
        tx,
    );

    // The failed first poll produces no event; the second completes.
    let event = rx.recv().await.expect("completion should arrive");
    assert!(matches!(event, PollEvent::SetupComplete(_)));
    assert_eq!(rx.recv().await, None);
    assert_eq!(status_request_count(&server).await, 2);
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn cancellation_stops_further_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(false)))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::channel(16);
    let poller = VerificationPoller::spawn(
        client(&server),
        Arc::new(Session::with_token("tok-1")),
        TEST_INTERVAL,
        tx,
    );

    // Let a couple of polls happen, then tear the poller down.
    for _ in 0..2 {
        let event = rx.recv().await.expect("poll event should arrive");
        assert!(matches!(event, PollEvent::Status(_)));
    }
    poller.join().await;

    let count_at_cancel = status_request_count(&server).await;
    tokio::time::sleep(TEST_INTERVAL * 5).await;
    assert_eq!(status_request_count(&server).await, count_at_cancel);

    // The task dropped its sender on exit.
    assert_eq!(rx.recv().await, None);
}
