//! Command-line interface
//!
//! Two-level commands that map one-to-one onto the library's `commands`
//! module. Every command prints its result as pretty JSON on stdout.

use anyhow::{bail, Context};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use routinex::app::{self, AppState};
use routinex::commands;
use routinex::config::AppConfig;
use routinex::database::{CreateTaskRequest, RepeatType};
use routinex::services::Theme;
use serde::Serialize;
use std::path::PathBuf;

/// RoutineX - daily tasks, health habits and monthly reports.
#[derive(Parser, Debug)]
#[command(name = "routinex")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the database and settings file
    #[arg(long, global = true, env = "ROUTINEX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage tasks and mark them done for a day
    #[command(subcommand)]
    Task(TaskCommand),

    /// Manage health habits and log their values
    #[command(subcommand)]
    Habit(HabitCommand),

    /// Monthly report (defaults to the current month)
    Report {
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Daily completion percentages between two dates
    Calendar {
        /// First day, YYYY-MM-DD
        start: String,
        /// Last day, YYYY-MM-DD
        end: String,
    },

    /// Recompute one day's completion percentage
    Recompute {
        /// Day, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Lifetime totals
    Stats,

    /// Delete all data and restore default settings
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Version and data directory
    Info,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// List active tasks
    List,

    /// Create a task
    Add {
        title: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long = "type", default_value = "")]
        task_type: String,
        /// Start time, HH:MM
        #[arg(long, default_value = "")]
        start: String,
        /// Duration in minutes
        #[arg(long, default_value_t = 0)]
        duration: i64,
        /// daily, weekly, monthly or once
        #[arg(long, default_value = "daily")]
        repeat: String,
        #[arg(long)]
        reminder: bool,
    },

    /// Change fields of a task
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type")]
        task_type: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        duration: Option<i64>,
        #[arg(long)]
        repeat: Option<String>,
        #[arg(long)]
        reminder: Option<bool>,
    },

    /// Deactivate a task (its history is kept)
    Delete { id: i64 },

    /// Completion logs for a day
    Logs {
        #[arg(long)]
        date: Option<String>,
    },

    /// Mark a task done for a day
    Toggle {
        id: i64,
        #[arg(long)]
        date: Option<String>,
        /// Mark as not done instead
        #[arg(long)]
        undo: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum HabitCommand {
    /// List habits
    List,

    /// Create a habit
    Add {
        name: String,
        /// boolean or value
        #[arg(long = "type", default_value = "boolean")]
        habit_type: String,
        /// general, exercise or medicine (derived from the name if omitted)
        #[arg(long)]
        role: Option<String>,
    },

    /// Delete a habit and all of its logs
    Delete { id: i64 },

    /// Habit logs for a day
    Logs {
        #[arg(long)]
        date: Option<String>,
    },

    /// Record a value ("true", "false" or a number) for a day
    Log {
        id: i64,
        value: String,
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print current settings
    Show,

    /// Change settings
    Set {
        /// light or dark
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        notifications: Option<bool>,
        /// Seed demo data into an empty database on startup
        #[arg(long)]
        seed_demo: Option<bool>,
    },

    /// Mark onboarding as completed
    Onboarded,
}

fn today() -> String {
    Local::now().date_naive().to_string()
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Open the store and execute one command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::resolve(cli.data_dir);
    let state = app::setup(&config)
        .await
        .with_context(|| format!("Failed to open data directory {:?}", config.data_dir))?;

    match cli.command {
        Command::Task(cmd) => run_task(&state, cmd).await,
        Command::Habit(cmd) => run_habit(&state, cmd).await,
        Command::Report { month, year } => {
            let now = Local::now().date_naive();
            let report = commands::get_monthly_report(
                &state,
                month.unwrap_or_else(|| now.month()),
                year.unwrap_or_else(|| now.year()),
            )
            .await?;
            print_json(&report)
        }
        Command::Calendar { start, end } => {
            print_json(&commands::get_calendar_summaries(&state, start, end).await?)
        }
        Command::Recompute { date } => {
            let date = date.unwrap_or_else(today);
            print_json(&commands::recompute_summary(&state, date).await?)
        }
        Command::Stats => print_json(&commands::get_dashboard_stats(&state).await?),
        Command::Reset { yes } => {
            if !yes {
                bail!("Refusing to delete all data without --yes");
            }
            commands::reset_all_data(&state).await?;
            eprintln!("All data cleared");
            Ok(())
        }
        Command::Settings(cmd) => run_settings(&state, cmd).await,
        Command::Info => print_json(&commands::get_app_info(&state).await?),
    }
}

async fn run_task(state: &AppState, cmd: TaskCommand) -> anyhow::Result<()> {
    match cmd {
        TaskCommand::List => print_json(&commands::list_tasks(state).await?),
        TaskCommand::Add {
            title,
            category,
            task_type,
            start,
            duration,
            repeat,
            reminder,
        } => {
            let req = CreateTaskRequest {
                title,
                category,
                task_type,
                start_time: start,
                duration,
                repeat_type: repeat.parse()?,
                reminder,
            };
            print_json(&commands::create_task(state, req).await?)
        }
        TaskCommand::Update {
            id,
            title,
            category,
            task_type,
            start,
            duration,
            repeat,
            reminder,
        } => {
            let mut task = commands::get_task(state, id).await?;
            if let Some(title) = title {
                task.title = title;
            }
            if let Some(category) = category {
                task.category = category;
            }
            if let Some(task_type) = task_type {
                task.task_type = task_type;
            }
            if let Some(start) = start {
                task.start_time = start;
            }
            if let Some(duration) = duration {
                task.duration = duration;
            }
            if let Some(repeat) = repeat {
                task.repeat_type = repeat.parse::<RepeatType>()?;
            }
            if let Some(reminder) = reminder {
                task.reminder = reminder;
            }
            print_json(&commands::update_task(state, task).await?)
        }
        TaskCommand::Delete { id } => {
            commands::delete_task(state, id).await?;
            eprintln!("Task {} deactivated", id);
            Ok(())
        }
        TaskCommand::Logs { date } => {
            print_json(&commands::get_task_logs(state, date.unwrap_or_else(today)).await?)
        }
        TaskCommand::Toggle { id, date, undo } => {
            let date = date.unwrap_or_else(today);
            print_json(&commands::toggle_task_completion(state, id, date, !undo).await?)
        }
    }
}

async fn run_habit(state: &AppState, cmd: HabitCommand) -> anyhow::Result<()> {
    match cmd {
        HabitCommand::List => print_json(&commands::list_habits(state).await?),
        HabitCommand::Add {
            name,
            habit_type,
            role,
        } => print_json(&commands::create_habit(state, name, habit_type, role).await?),
        HabitCommand::Delete { id } => {
            commands::delete_habit(state, id).await?;
            eprintln!("Habit {} deleted", id);
            Ok(())
        }
        HabitCommand::Logs { date } => {
            print_json(&commands::get_health_logs(state, date.unwrap_or_else(today)).await?)
        }
        HabitCommand::Log { id, value, date } => {
            let date = date.unwrap_or_else(today);
            print_json(&commands::log_habit(state, id, date, value).await?)
        }
    }
}

async fn run_settings(state: &AppState, cmd: SettingsCommand) -> anyhow::Result<()> {
    match cmd {
        SettingsCommand::Show => print_json(&commands::get_settings(state).await?),
        SettingsCommand::Set {
            theme,
            notifications,
            seed_demo,
        } => {
            let mut settings = commands::get_settings(state).await?;
            if let Some(theme) = theme {
                settings.theme = theme.parse::<Theme>()?;
            }
            if let Some(notifications) = notifications {
                settings.notifications_enabled = notifications;
            }
            if let Some(seed_demo) = seed_demo {
                settings.seed_demo_data = seed_demo;
            }
            print_json(&commands::update_settings(state, settings).await?)
        }
        SettingsCommand::Onboarded => {
            commands::complete_onboarding(state).await?;
            eprintln!("Onboarding completed");
            Ok(())
        }
    }
}
