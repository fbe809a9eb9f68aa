use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ScoreFactors;
use super::orchestrator::{CollectionsOrchestrator, OrchestratorError};
use super::repository::{DebtRepository, NotificationChannel, RepositoryError};
use super::scoring::RiskScorer;

/// Shared state for the collections endpoints.
pub struct CollectionsRouterState<R, N> {
    pub scorer: Arc<RiskScorer>,
    pub orchestrator: Arc<CollectionsOrchestrator<R, N>>,
}

impl<R, N> Clone for CollectionsRouterState<R, N> {
    fn clone(&self) -> Self {
        Self {
            scorer: self.scorer.clone(),
            orchestrator: self.orchestrator.clone(),
        }
    }
}

/// Router builder exposing HTTP endpoints for scoring and collections runs.
pub fn collections_router<R, N>(
    scorer: Arc<RiskScorer>,
    orchestrator: Arc<CollectionsOrchestrator<R, N>>,
) -> Router
where
    R: DebtRepository + 'static,
    N: NotificationChannel + 'static,
{
    let state = CollectionsRouterState {
        scorer,
        orchestrator,
    };
    Router::new()
        .route("/api/v1/collections/score", post(score_handler::<R, N>))
        .route("/api/v1/collections/queue", get(queue_handler::<R, N>))
        .route("/api/v1/collections/run", post(run_handler::<R, N>))
        .with_state(state)
}

/// Wire form of [`ScoreFactors`]; the term arrives as a raw day count and is
/// validated into the enum at this boundary.
#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) amount: f64,
    pub(crate) payment_term_days: u16,
    #[serde(default)]
    pub(crate) has_known_customer: bool,
}

pub(crate) async fn score_handler<R, N>(
    State(state): State<CollectionsRouterState<R, N>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    R: DebtRepository + 'static,
    N: NotificationChannel + 'static,
{
    match ScoreFactors::new(
        request.amount,
        request.payment_term_days,
        request.has_known_customer,
    ) {
        Ok(factors) => {
            let assessment = state.scorer.assess(&factors);
            (StatusCode::OK, axum::Json(assessment)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn queue_handler<R, N>(
    State(state): State<CollectionsRouterState<R, N>>,
) -> Response
where
    R: DebtRepository + 'static,
    N: NotificationChannel + 'static,
{
    match state.orchestrator.preview() {
        Ok(queue) => (StatusCode::OK, axum::Json(queue)).into_response(),
        Err(error) => orchestrator_error_response(error),
    }
}

pub(crate) async fn run_handler<R, N>(State(state): State<CollectionsRouterState<R, N>>) -> Response
where
    R: DebtRepository + 'static,
    N: NotificationChannel + 'static,
{
    match state.orchestrator.run() {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => orchestrator_error_response(error),
    }
}

fn orchestrator_error_response(error: OrchestratorError) -> Response {
    let status = match &error {
        OrchestratorError::Persistence(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        OrchestratorError::Persistence(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
