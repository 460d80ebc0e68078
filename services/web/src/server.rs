use crate::cli::ServeArgs;
use crate::infra::{apply_data_overrides, AppState, DashboardState};
use crate::routes::dashboard_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use retention_dashboard::config::AppConfig;
use retention_dashboard::error::AppError;
use retention_dashboard::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    apply_data_overrides(&mut config.data, args.data);

    telemetry::init(&config.telemetry)?;

    if !config.data.database_path.is_file() {
        warn!(
            database = %config.data.database_path.display(),
            "employee events database not found; report pages will fail until it exists"
        );
    }

    let dashboard = DashboardState::load(&config.data)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = dashboard_router(dashboard)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        database = %config.data.database_path.display(),
        "retention dashboard ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
