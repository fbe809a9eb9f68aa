use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::collections::domain::DebtStatus;
use crate::collections::orchestrator::CollectionsOrchestrator;
use crate::collections::router::collections_router;
use crate::collections::scoring::{RiskScorer, RECOMMEND_CRITICAL};

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn router_with(
    repository: Arc<MemoryRepository>,
) -> (axum::Router, Arc<RecordingChannel>) {
    let channel = Arc::new(RecordingChannel::default());
    let orchestrator = Arc::new(CollectionsOrchestrator::new(repository, channel.clone()));
    (
        collections_router(Arc::new(RiskScorer::default()), orchestrator),
        channel,
    )
}

#[tokio::test]
async fn score_endpoint_returns_the_assessment() {
    let (router, _channel) = router_with(MemoryRepository::seed(Vec::new()));

    let request = post_json(
        "/api/v1/collections/score",
        json!({ "amount": 60000.0, "payment_term_days": 60, "has_known_customer": true }),
    );
    let response = router.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["risk_score"], 45);
    assert_eq!(body["risk_level"], "high");
    assert_eq!(body["recommendation"], RECOMMEND_CRITICAL);
}

#[tokio::test]
async fn score_endpoint_rejects_unknown_terms() {
    let (router, _channel) = router_with(MemoryRepository::seed(Vec::new()));

    let request = post_json(
        "/api/v1/collections/score",
        json!({ "amount": 1000.0, "payment_term_days": 99 }),
    );
    let response = router.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().expect("error string").contains("99"));
}

#[tokio::test]
async fn queue_endpoint_lists_ranked_actions() {
    let repository = MemoryRepository::seed([
        debt("low", 10, "2024-01-10", DebtStatus::Pending),
        debt("high", 80, "2024-01-05", DebtStatus::Overdue),
    ]);
    let (router, _channel) = router_with(repository);

    let request = Request::builder()
        .uri("/api/v1/collections/queue")
        .body(Body::empty())
        .expect("request builds");
    let response = router.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let queue = body.as_array().expect("queue array");
    assert_eq!(queue.len(), 4);
    assert_eq!(queue[0]["debt_id"], "high");
    assert_eq!(queue[0]["action"], "remind");
    assert_eq!(queue[3]["debt_id"], "low");
}

#[tokio::test]
async fn run_endpoint_reports_per_item_outcomes() {
    let repository = MemoryRepository::seed([
        debt("ok", 10, "2024-01-01", DebtStatus::Pending),
        debt("broken", 10, "2024-01-02", DebtStatus::Pending),
    ]);
    let channel = FlakyChannel::failing_for("broken");
    let orchestrator = Arc::new(CollectionsOrchestrator::new(repository, channel));
    let router = collections_router(Arc::new(RiskScorer::default()), orchestrator);

    let response = router
        .oneshot(post_json("/api/v1/collections/run", json!({})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["considered"], 2);
    let outcomes = body["outcomes"].as_array().expect("outcomes array");
    assert_eq!(outcomes.len(), 2);
    for outcome in outcomes {
        let expected = if outcome["debt_id"] == "broken" {
            "failed"
        } else {
            "delivered"
        };
        assert_eq!(outcome["disposition"]["status"], expected);
    }
}

#[tokio::test]
async fn run_endpoint_maps_unavailable_persistence_to_service_unavailable() {
    let orchestrator = Arc::new(CollectionsOrchestrator::new(
        Arc::new(UnavailableRepository),
        Arc::new(RecordingChannel::default()),
    ));
    let router = collections_router(Arc::new(RiskScorer::default()), orchestrator);

    let response = router
        .oneshot(post_json("/api/v1/collections/run", json!({})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
