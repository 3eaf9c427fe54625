//! Commands exposed to the UI layer
//!
//! All commands follow the pattern:
//! - Take AppState as first parameter
//! - Accept plain strings and numbers as a UI bridge would pass them
//! - Return Result<T, AppError> with serializable T
//!
//! Submodules:
//! - `tasks`: Task CRUD and completion toggles
//! - `habits`: Habit CRUD and value logging
//! - `reports`: Monthly report, calendar and dashboard figures
//! - `settings`: Settings, onboarding and data reset

pub mod habits;
pub mod reports;
pub mod settings;
pub mod tasks;

use crate::app::AppState;
use crate::config;
use crate::error::{AppError, Result};
use chrono::NaiveDate;

pub use habits::*;
pub use reports::*;
pub use settings::*;
pub use tasks::*;

/// Parse a `YYYY-MM-DD` calendar day
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), config::DATE_FORMAT)
        .map_err(|e| AppError::validation(format!("Invalid date {:?}: {}", date, e)))
}

/// Get application information
pub async fn get_app_info(state: &AppState) -> Result<AppInfo> {
    Ok(AppInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        app_data_dir: state.data_dir.to_string_lossy().to_string(),
    })
}

/// Application information structure
#[derive(serde::Serialize)]
pub struct AppInfo {
    pub version: String,
    pub app_data_dir: String,
}
