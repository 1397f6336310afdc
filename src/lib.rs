pub mod alerts;
pub mod catalog;
pub mod chat;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod formatter;
pub mod insights;
pub mod logging;
pub mod mapper;
pub mod models;
pub mod session;
pub mod store;

pub use crate::alerts::derive_alerts;
pub use crate::chat::respond;
pub use crate::commands::AppState;
pub use crate::dashboard::{DashboardCore, TabView};
pub use crate::errors::{AppError, AppResult};
pub use crate::mapper::{map_category, CategoryMaps};
pub use crate::models::{AppSettings, Kpi};

use std::path::Path;

/// Reads settings, installs logging and builds the dashboard state. The
/// refresh task, when configured, runs detached for the life of the runtime.
pub async fn start(settings_path: &Path) -> Result<AppState, String> {
    let settings = config::load_settings(settings_path).map_err(commands::to_client_error)?;
    logging::init_tracing(settings.log_dir.as_deref()).map_err(commands::to_client_error)?;

    let core = DashboardCore::new(settings).await;
    tracing::info!(kpis = core.kpis().len(), "dashboard core ready");
    if core.spawn_refresh().is_some() {
        tracing::info!(
            interval_secs = core.settings().refresh_interval_secs,
            "periodic KPI refresh enabled"
        );
    }

    Ok(AppState::new(core))
}
