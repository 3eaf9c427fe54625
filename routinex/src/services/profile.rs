//! Profile service
//!
//! Onboarding state and the "reset all data" action.

use crate::database::Repository;
use crate::error::Result;
use crate::services::SettingsService;

#[derive(Clone)]
pub struct ProfileService {
    repo: Repository,
    settings: SettingsService,
}

impl ProfileService {
    pub fn new(repo: Repository, settings: SettingsService) -> Self {
        Self { repo, settings }
    }

    /// Whether onboarding still needs to be shown
    pub async fn is_first_launch(&self) -> Result<bool> {
        Ok(!self.settings.load().await?.has_launched)
    }

    pub async fn complete_onboarding(&self) -> Result<()> {
        tracing::info!("Onboarding completed");
        self.settings.mark_launched().await
    }

    /// Delete all tasks, habits, logs and summaries, then restore default settings
    pub async fn reset_all_data(&self) -> Result<()> {
        tracing::warn!("Resetting all data");

        self.repo.reset_all_data().await?;
        self.settings.reset().await?;

        tracing::info!("All data cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, HabitType};
    use crate::services::HabitService;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_onboarding_then_reset() {
        let temp = TempDir::new().unwrap();
        let pool = create_memory_pool().await.unwrap();
        let repo = Repository::new(pool);
        let settings = SettingsService::new(temp.path().join("settings.json"));
        let profile = ProfileService::new(repo.clone(), settings);
        let habits = HabitService::new(repo);

        assert!(profile.is_first_launch().await.unwrap());
        profile.complete_onboarding().await.unwrap();
        assert!(!profile.is_first_launch().await.unwrap());

        habits
            .create_habit("Exercise".to_string(), HabitType::Boolean)
            .await
            .unwrap();

        profile.reset_all_data().await.unwrap();

        assert!(profile.is_first_launch().await.unwrap());
        assert!(habits.list_habits().await.unwrap().is_empty());
    }
}
