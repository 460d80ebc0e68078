use crate::cli::DataArgs;
use metrics_exporter_prometheus::PrometheusHandle;
use retention_dashboard::config::DataConfig;
use retention_dashboard::employee_events::Database;
use retention_dashboard::error::AppError;
use retention_dashboard::report::Report;
use retention_dashboard::risk::RiskModel;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared, read-only state behind every dashboard route.
#[derive(Clone)]
pub(crate) struct DashboardState {
    pub(crate) database: Database,
    pub(crate) report: Arc<Report>,
    pub(crate) assets_dir: PathBuf,
}

impl DashboardState {
    /// Loads the risk model once and builds the report tree around it.
    pub(crate) fn load(data: &DataConfig) -> Result<Self, AppError> {
        let predictor = RiskModel::load_or_default(data.model_path.as_deref())?;
        Ok(Self::new(
            Database::new(data.database_path.clone()),
            predictor,
            data.assets_dir.clone(),
        ))
    }

    pub(crate) fn new(database: Database, predictor: RiskModel, assets_dir: PathBuf) -> Self {
        Self {
            database,
            report: Arc::new(Report::new(Arc::new(predictor))),
            assets_dir,
        }
    }
}

pub(crate) fn apply_data_overrides(data: &mut DataConfig, args: DataArgs) {
    if let Some(database) = args.database {
        data.database_path = database;
    }
    if let Some(model) = args.model {
        data.model_path = Some(model);
    }
}
