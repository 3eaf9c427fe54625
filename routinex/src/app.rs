//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! The store handle is opened once here and every service receives a
//! clone of the same repository.

use crate::config::AppConfig;
use crate::database::{create_pool, Repository};
use crate::error::Result;
use crate::services::{
    seed, HabitService, ProfileService, ReportService, SettingsService, SummaryService,
    TaskService,
};
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::SqlitePool;
use std::path::PathBuf;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub tasks_service: TaskService,
    pub habits_service: HabitService,
    pub summary_service: SummaryService,
    pub reports_service: ReportService,
    pub settings_service: SettingsService,
    pub profile_service: ProfileService,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: SqlitePool) -> Self {
        let repo = Repository::new(pool);
        let settings_service = SettingsService::new(config.settings_path());

        Self {
            data_dir: config.data_dir.clone(),
            tasks_service: TaskService::new(repo.clone()),
            habits_service: HabitService::new(repo.clone()),
            summary_service: SummaryService::new(repo.clone()),
            reports_service: ReportService::new(repo.clone()),
            profile_service: ProfileService::new(repo, settings_service.clone()),
            settings_service,
        }
    }
}

/// Application setup - called once on startup
pub async fn setup(config: &AppConfig) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("App data directory: {:?}", config.data_dir);

    tokio::fs::create_dir_all(&config.data_dir).await?;

    let pool = create_pool(&config.database_path()).await?;
    let state = AppState::new(config, pool);

    let settings = state.settings_service.load().await?;
    if settings.seed_demo_data {
        let mut rng = StdRng::from_entropy();
        seed::seed_demo_data(
            &state.tasks_service,
            &state.habits_service,
            Local::now().date_naive(),
            &mut rng,
        )
        .await?;
    }

    tracing::info!("Application initialized successfully");

    Ok(state)
}
