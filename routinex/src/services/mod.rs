//! Services module
//!
//! Business logic services that coordinate between commands and repository.

pub mod habits;
pub mod profile;
pub mod reports;
pub mod seed;
pub mod settings;
pub mod summary;
pub mod tasks;

pub use habits::HabitService;
pub use profile::ProfileService;
pub use reports::{MonthlyReport, ReportMonth, ReportService};
pub use settings::{AppSettings, SettingsService, Theme};
pub use summary::SummaryService;
pub use tasks::TaskService;
