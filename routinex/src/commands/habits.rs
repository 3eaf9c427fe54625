//! Habit-related commands
//!
//! CRUD operations and value logging for health habits.

use super::parse_date;
use crate::app::AppState;
use crate::database::{Habit, HabitRole, HabitType, HealthLog};
use crate::error::Result;

/// List all habits
pub async fn list_habits(state: &AppState) -> Result<Vec<Habit>> {
    state.habits_service.list_habits().await
}

/// Create a habit. `habit_type` is "Boolean" or "Value"; `role` is optional.
pub async fn create_habit(
    state: &AppState,
    name: String,
    habit_type: String,
    role: Option<String>,
) -> Result<Habit> {
    let habit_type: HabitType = habit_type.parse()?;
    let role = role.map(|r| r.parse::<HabitRole>()).transpose()?;

    state
        .habits_service
        .create_habit_with_role(name, habit_type, role)
        .await
}

/// Delete a habit and its logs
pub async fn delete_habit(state: &AppState, id: i64) -> Result<()> {
    state.habits_service.delete_habit(id).await
}

/// Habit logs for a day
pub async fn get_health_logs(state: &AppState, date: String) -> Result<Vec<HealthLog>> {
    let date = parse_date(&date)?;
    state.habits_service.get_logs_for_date(date).await
}

/// Record a habit value for a day
pub async fn log_habit(
    state: &AppState,
    habit_id: i64,
    date: String,
    value: String,
) -> Result<HealthLog> {
    let date = parse_date(&date)?;
    state.habits_service.log_value(habit_id, date, &value).await
}
