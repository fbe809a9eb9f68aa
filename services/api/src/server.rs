use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryDebtRepository, LoggingNotificationChannel};
use crate::routes::with_collections_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use collections_engine::collections::{CollectionsOrchestrator, RiskScorer};
use collections_engine::config::AppConfig;
use collections_engine::error::AppError;
use collections_engine::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryDebtRepository::default());
    let channel = Arc::new(LoggingNotificationChannel::default());
    let scorer = Arc::new(RiskScorer::new(crate::infra::default_scoring_config()));
    let orchestrator = Arc::new(CollectionsOrchestrator::new(repository, channel));

    let app = with_collections_routes(scorer, orchestrator)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "collections scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
