//! Application configuration constants
//!
//! Central location for file names, formats, report labels and seed
//! sizes used throughout the data layer.

use std::path::PathBuf;

// ===== Storage =====

/// SQLite database file inside the data directory
pub const DATABASE_FILE_NAME: &str = "routinex.db";

/// JSON settings file inside the data directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "ROUTINEX_DATA_DIR";

/// Data directory used when neither the flag nor the environment sets one
pub const DEFAULT_DATA_DIR: &str = ".routinex";

/// How long a statement waits on a locked database before failing
pub const BUSY_TIMEOUT_SECS: u64 = 5;

// ===== Dates =====

/// Calendar-day format used for every `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wall-clock format for `tasks.start_time`
pub const START_TIME_FORMAT: &str = "%H:%M";

// ===== Report =====

/// Placeholder for best/worst habit when a month has no positive logs
pub const NOT_AVAILABLE: &str = "N/A";

/// Health-log value counted as a completed boolean habit
pub const HABIT_VALUE_TRUE: &str = "true";

/// Health-log value counted as a missed boolean habit
pub const HABIT_VALUE_FALSE: &str = "false";

/// Legacy habit names that map onto report roles
pub const EXERCISE_HABIT_NAME: &str = "Exercise";
pub const MEDICINE_HABIT_NAME: &str = "Medicine";

// ===== Demo Data =====

/// Number of past days (including today) that get generated logs
pub const DEMO_HISTORY_DAYS: i64 = 7;

/// Probability that a demo task is marked completed on a given day
pub const DEMO_TASK_COMPLETION_RATE: f64 = 0.7;

/// Probability that a boolean demo habit is logged as done on a given day
pub const DEMO_HABIT_SUCCESS_RATE: f64 = 0.8;

/// Runtime configuration resolved at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Resolve the data directory: explicit value, then environment, then default.
    pub fn resolve(data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Self { data_dir }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE_NAME)
    }
}
