//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde for serialization to the UI bridge.

use crate::config;
use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How often a task recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum RepeatType {
    Daily,
    Weekly,
    Monthly,
    Once,
}

impl std::str::FromStr for RepeatType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(RepeatType::Daily),
            "weekly" => Ok(RepeatType::Weekly),
            "monthly" => Ok(RepeatType::Monthly),
            "once" => Ok(RepeatType::Once),
            other => Err(AppError::validation(format!("Unknown repeat type: {}", other))),
        }
    }
}

/// A routine item scheduled at a time of day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub category: String,
    /// Free-form label such as "Exercise" or "Study"
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub task_type: String,
    /// `HH:MM`
    pub start_time: String,
    /// Minutes
    pub duration: i64,
    pub repeat_type: RepeatType,
    pub reminder: bool,
    /// Soft-delete flag
    pub is_active: bool,
}

impl Task {
    pub fn validate(&self) -> Result<()> {
        validate_task_fields(&self.title, &self.start_time, self.duration)
    }
}

/// Create task request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "type")]
    pub task_type: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub duration: i64,
    pub repeat_type: RepeatType,
    #[serde(default)]
    pub reminder: bool,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> Result<()> {
        validate_task_fields(&self.title, &self.start_time, self.duration)
    }
}

fn validate_task_fields(title: &str, start_time: &str, duration: i64) -> Result<()> {
    validate_name("Task title", title)?;

    if !start_time.is_empty()
        && NaiveTime::parse_from_str(start_time, config::START_TIME_FORMAT).is_err()
    {
        return Err(AppError::validation(format!(
            "Start time must be HH:MM, got {:?}",
            start_time
        )));
    }

    if duration < 0 {
        return Err(AppError::validation(format!(
            "Duration must not be negative, got {}",
            duration
        )));
    }

    Ok(())
}

fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} must not be empty", field)));
    }

    Ok(())
}

/// Completion record for one task on one day
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TaskLog {
    pub id: i64,
    pub task_id: i64,
    pub date: NaiveDate,
    pub completed: bool,
    /// Only set while `completed` is true
    pub completed_at: Option<DateTime<Utc>>,
}

/// Result of toggling a task: the upserted log and the refreshed summary
#[derive(Debug, Clone, Serialize)]
pub struct TaskCompletion {
    pub log: TaskLog,
    pub summary: DailySummary,
}

/// Whether a habit is tracked as done/not done or as a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum HabitType {
    Boolean,
    Value,
}

impl std::str::FromStr for HabitType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "boolean" | "bool" => Ok(HabitType::Boolean),
            "value" | "numeric" => Ok(HabitType::Value),
            other => Err(AppError::validation(format!("Unknown habit type: {}", other))),
        }
    }
}

/// What a habit means to the monthly report, independent of its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HabitRole {
    #[default]
    General,
    Exercise,
    Medicine,
}

impl HabitRole {
    /// Role implied by a habit's display name.
    ///
    /// Only the exact names "Exercise" and "Medicine" carry a role.
    pub fn from_name(name: &str) -> Self {
        match name {
            config::EXERCISE_HABIT_NAME => HabitRole::Exercise,
            config::MEDICINE_HABIT_NAME => HabitRole::Medicine,
            _ => HabitRole::General,
        }
    }
}

impl std::str::FromStr for HabitRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(HabitRole::General),
            "exercise" => Ok(HabitRole::Exercise),
            "medicine" => Ok(HabitRole::Medicine),
            other => Err(AppError::validation(format!("Unknown habit role: {}", other))),
        }
    }
}

/// A tracked health behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    pub role: HabitRole,
}

/// Create habit request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    /// Falls back to [`HabitRole::from_name`] when absent
    #[serde(default)]
    pub role: Option<HabitRole>,
}

impl CreateHabitRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name("Habit name", &self.name)
    }

    pub fn resolved_role(&self) -> HabitRole {
        self.role
            .unwrap_or_else(|| HabitRole::from_name(self.name.trim()))
    }
}

/// Value recorded for one habit on one day
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HealthLog {
    pub id: i64,
    pub habit_id: i64,
    pub date: NaiveDate,
    /// "true"/"false" for boolean habits, a numeric string otherwise
    pub value: String,
}

/// Cached completion percentage for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub completion_percentage: i64,
}

/// Positive log count for one habit name within a month
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct HabitLogCount {
    pub name: String,
    pub count: i64,
}

/// Lifetime totals shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub completed_tasks: i64,
    pub habit_logs: i64,
}
