use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::market_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jobmarket::config::AppConfig;
use jobmarket::error::AppError;
use jobmarket::telemetry;
use jobmarket::DatasetImporter;
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
    if let Some(dataset) = args.dataset.take() {
        config.dataset.source_path = dataset;
    }

    telemetry::init(&config.telemetry)?;

    let dataset =
        DatasetImporter::from_config(&config.dataset).import_path(&config.dataset.source_path)?;
    info!(source = %config.dataset.source_path.display(), "market snapshot loaded");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        dataset: Arc::new(dataset),
    };

    let app = market_router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job market analytics service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
