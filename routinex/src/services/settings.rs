//! Settings service
//!
//! Manages application settings persistence using JSON file storage.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// Color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(AppError::validation(format!("Unknown theme: {}", other))),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Set once onboarding has been shown
    #[serde(default)]
    pub has_launched: bool,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default)]
    pub theme: Theme,
    /// Fill an empty database with a week of sample data on startup
    #[serde(default)]
    pub seed_demo_data: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            has_launched: false,
            notifications_enabled: true,
            theme: Theme::default(),
            seed_demo_data: false,
        }
    }
}

/// Service for managing application settings
#[derive(Clone)]
pub struct SettingsService {
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new(settings_path: PathBuf) -> Self {
        Self { settings_path }
    }

    /// Load settings from disk or create default if not exists
    pub async fn load(&self) -> Result<AppSettings> {
        if !fs::try_exists(&self.settings_path).await? {
            tracing::info!("Settings file not found, creating default settings");
            let default = AppSettings::default();
            self.save(&default).await?;
            return Ok(default);
        }

        let content = fs::read_to_string(&self.settings_path).await?;
        let settings: AppSettings = serde_json::from_str(&content)
            .map_err(|e| AppError::Generic(format!("Failed to parse settings: {}", e)))?;

        Ok(settings)
    }

    /// Save settings to disk
    pub async fn save(&self, settings: &AppSettings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings)?;

        fs::write(&self.settings_path, content).await?;
        tracing::info!("Settings saved to {:?}", self.settings_path);

        Ok(())
    }

    /// Overwrite the settings file with defaults
    pub async fn reset(&self) -> Result<AppSettings> {
        let default = AppSettings::default();
        self.save(&default).await?;
        Ok(default)
    }

    /// Record that onboarding was completed
    pub async fn mark_launched(&self) -> Result<()> {
        let mut settings = self.load().await?;
        if !settings.has_launched {
            settings.has_launched = true;
            self.save(&settings).await?;
        }
        Ok(())
    }
}
