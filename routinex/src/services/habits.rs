//! Habits service
//!
//! Habit CRUD and per-day value logging. Log values are stored as given;
//! callers shape them as "true"/"false" or a number per the habit type.

use crate::database::{CreateHabitRequest, Habit, HabitRole, HabitType, HealthLog, Repository};
use crate::error::Result;
use chrono::NaiveDate;

/// Service for managing habits
#[derive(Clone)]
pub struct HabitService {
    repo: Repository,
}

impl HabitService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn list_habits(&self) -> Result<Vec<Habit>> {
        self.repo.list_habits().await
    }

    /// Create a habit whose report role follows its name
    pub async fn create_habit(&self, name: String, habit_type: HabitType) -> Result<Habit> {
        self.create_habit_with_role(name, habit_type, None).await
    }

    /// Create a habit with an explicit report role
    pub async fn create_habit_with_role(
        &self,
        name: String,
        habit_type: HabitType,
        role: Option<HabitRole>,
    ) -> Result<Habit> {
        let req = CreateHabitRequest {
            name,
            habit_type,
            role,
        };
        req.validate()?;

        tracing::info!("Creating habit: {} ({:?})", req.name, req.habit_type);

        let habit = self.repo.create_habit(&req).await?;

        tracing::info!("Habit created successfully: {}", habit.id);

        Ok(habit)
    }

    /// Delete a habit and every value logged for it
    pub async fn delete_habit(&self, id: i64) -> Result<()> {
        tracing::info!("Deleting habit: {}", id);

        let removed = self.repo.delete_habit(id).await?;

        tracing::info!("Habit {} deleted with {} logs", id, removed);

        Ok(())
    }

    pub async fn get_logs_for_date(&self, date: NaiveDate) -> Result<Vec<HealthLog>> {
        self.repo.list_health_logs_for_date(date).await
    }

    /// Record a habit's value for a day, replacing any earlier value
    pub async fn log_value(&self, habit_id: i64, date: NaiveDate, value: &str) -> Result<HealthLog> {
        self.repo.log_habit_value(habit_id, date, value).await
    }
}
