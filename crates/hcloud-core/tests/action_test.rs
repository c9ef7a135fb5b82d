#![allow(clippy::unwrap_used)]
// Action lookups, refresh, and cancellation of in-flight work.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use hcloud_core::{
    ActionListOpts, ActionStatus, Client, CoreError, Request, Response, Transport,
};

// ── Lookups ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_action_is_none() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/actions/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(common::not_found("action", 99)))
        .expect(1)
        .mount(&server)
        .await;

    let (action, response) = client.actions().get_by_id(99).await.unwrap();
    assert!(action.is_none());
    assert_eq!(response.status, 404);
    assert_eq!(response.body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_refresh_replaces_snapshot() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/actions/13"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "action": common::action(13, "attach_volume", "success")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let running = common::action_entity(13, "attach_volume", "running");
    let (refreshed, _) = client.actions().refresh(&running).await.unwrap();

    assert!(!running.is_terminal());
    assert!(refreshed.is_success());
    assert_eq!(refreshed.progress, 100);
    assert!(refreshed.finished.is_some());
}

#[tokio::test]
async fn test_refresh_of_vanished_action_is_error() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/actions/13"))
        .respond_with(ResponseTemplate::new(404).set_body_json(common::not_found("action", 13)))
        .mount(&server)
        .await;

    let running = common::action_entity(13, "attach_volume", "running");
    let err = client.actions().refresh(&running).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_failed_action_keeps_error_cause() {
    let (server, client) = common::setup().await;

    let mut failed = common::action(14, "attach_volume", "error");
    failed["error"] = json!({ "code": "action_failed", "message": "volume is locked" });

    Mock::given(method("GET"))
        .and(path("/actions/14"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "action": failed })))
        .mount(&server)
        .await;

    let (action, _) = client.actions().get_by_id(14).await.unwrap();
    let action = action.unwrap();

    assert!(action.is_terminal());
    assert!(!action.is_success());
    let cause = action.failure().unwrap();
    assert_eq!(cause.code, "action_failed");
    assert_eq!(cause.message, "volume is locked");
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/actions"))
        .and(query_param("status", "running"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "actions": [common::action(1, "create_volume", "running")],
            "meta": common::meta(1, 25, None, 1)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = ActionListOpts {
        status: vec![ActionStatus::Running],
        ..ActionListOpts::default()
    };
    let (actions, _) = client.actions().list(&opts).await.unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].status, ActionStatus::Running);
}

// ── Cancellation ────────────────────────────────────────────────────

#[tokio::test]
async fn test_cancelled_client_sends_nothing() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    token.cancel();
    let client = client.with_cancellation(token);

    let err = client.actions().get_by_id(1).await.unwrap_err();
    assert!(matches!(err, CoreError::Cancelled));
}

/// Never answers.
struct StallingTransport;

#[async_trait]
impl Transport for StallingTransport {
    async fn request(&self, _request: Request) -> Result<Response, hcloud_api::Error> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_request() {
    let token = CancellationToken::new();
    let client = Client::new(StallingTransport).with_cancellation(token.clone());

    let volumes = client.volumes();

    let (result, ()) = tokio::join!(volumes.all(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();
    });

    assert!(matches!(result, Err(CoreError::Cancelled)));
}

/// Serves an endless action listing and cancels after the first page.
struct CancelAfterFirstPage {
    token: CancellationToken,
    requests: Arc<AtomicUsize>,
}

#[async_trait]
impl Transport for CancelAfterFirstPage {
    async fn request(&self, request: Request) -> Result<Response, hcloud_api::Error> {
        let served = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        let page = u32::try_from(served).unwrap();
        assert_eq!(request.path, "/actions");
        self.token.cancel();
        Ok(Response::new(
            200,
            json!({
                "actions": [common::action(i64::from(page), "create_volume", "running")],
                "meta": common::meta(page, 50, Some(page + 1), 10)
            }),
        ))
    }
}

#[tokio::test]
async fn test_cancel_stops_pagination_between_pages() {
    let token = CancellationToken::new();
    let requests = Arc::new(AtomicUsize::new(0));
    let transport = CancelAfterFirstPage {
        token: token.clone(),
        requests: Arc::clone(&requests),
    };
    let client = Client::new(transport).with_cancellation(token);

    let err = client.actions().all().await.unwrap_err();

    assert!(matches!(err, CoreError::Cancelled));
    assert_eq!(requests.load(Ordering::SeqCst), 1);
}
