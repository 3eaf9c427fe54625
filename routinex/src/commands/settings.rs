//! Settings-related commands
//!
//! Application settings, onboarding and the full data reset.

use crate::app::AppState;
use crate::error::Result;
use crate::services::AppSettings;

/// Get current application settings
pub async fn get_settings(state: &AppState) -> Result<AppSettings> {
    state.settings_service.load().await
}

/// Save application settings
pub async fn update_settings(state: &AppState, settings: AppSettings) -> Result<AppSettings> {
    tracing::info!("Updating settings");
    state.settings_service.save(&settings).await?;
    Ok(settings)
}

/// Whether onboarding should be shown
pub async fn is_first_launch(state: &AppState) -> Result<bool> {
    state.profile_service.is_first_launch().await
}

/// Mark onboarding as done
pub async fn complete_onboarding(state: &AppState) -> Result<()> {
    state.profile_service.complete_onboarding().await
}

/// Delete every task, habit, log and summary and restore default settings
pub async fn reset_all_data(state: &AppState) -> Result<()> {
    state.profile_service.reset_all_data().await
}
