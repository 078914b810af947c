use crate::cli::ServeArgs;
use crate::infra::{build_pipeline, AppState, InMemorySessionStore};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_intent::config::AppConfig;
use lead_intent::error::AppError;
use lead_intent::telemetry;
use lead_intent::workflows::scoring::LeadScoringService;
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

    let store = Arc::new(InMemorySessionStore::default());
    let pipeline = Arc::new(build_pipeline(&config.llm));
    let scoring_service = Arc::new(LeadScoringService::new(pipeline, store));

    let app = with_scoring_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model = %config.llm.model,
        "lead scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
