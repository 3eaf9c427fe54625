//! Monthly report service
//!
//! Builds the read-only monthly report. Each figure is computed on its own:
//! an empty month yields zeros and "N/A", and a failing query is logged and
//! replaced by its default instead of failing the whole report.

use crate::config;
use crate::database::repository::rounded_percent;
use crate::database::{DailySummary, DashboardStats, HabitLogCount, HabitRole, Repository};
use crate::error::{AppError, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

/// A calendar month a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    year: i32,
    month: u32,
    first_day: NaiveDate,
}

impl ReportMonth {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self {
                year,
                month,
                first_day,
            })
            .ok_or_else(|| AppError::validation(format!("Invalid month: {}-{:02}", year, month)))
    }

    /// `LIKE` pattern matching every date of the month
    pub fn date_pattern(&self) -> String {
        format!("{:04}-{:02}-%", self.year, self.month)
    }

    pub fn days_in_month(&self) -> u32 {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|next| (next - self.first_day).num_days() as u32)
            .unwrap_or(31)
    }

    /// Days counted so far: today's day-of-month inside the current month,
    /// the full month length for any other month.
    pub fn elapsed_days(&self, today: NaiveDate) -> u32 {
        if today.year() == self.year && today.month() == self.month {
            today.day()
        } else {
            self.days_in_month()
        }
    }
}

/// Aggregates for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub avg_completion: i64,
    pub exercise_days: i64,
    pub medicine_adherence: i64,
    pub best_habit: String,
    pub worst_habit: String,
    pub daily_summaries: Vec<DailySummary>,
}

/// Service computing reports and dashboard totals
#[derive(Clone)]
pub struct ReportService {
    repo: Repository,
}

impl ReportService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Build the report for `month` (1-12) of `year` as of today
    pub async fn build_monthly_report(&self, month: u32, year: i32) -> Result<MonthlyReport> {
        self.build_monthly_report_at(month, year, Local::now().date_naive())
            .await
    }

    /// Build the report treating `today` as the current date
    pub async fn build_monthly_report_at(
        &self,
        month: u32,
        year: i32,
        today: NaiveDate,
    ) -> Result<MonthlyReport> {
        let period = ReportMonth::new(month, year)?;
        let pattern = period.date_pattern();

        tracing::info!("Building monthly report for {}-{:02}", year, month);

        let (avg, exercise, medicine, counts, summaries) = tokio::join!(
            self.repo.average_completion(&pattern),
            self.repo
                .count_role_logs(HabitRole::Exercise, config::HABIT_VALUE_TRUE, &pattern),
            self.repo
                .count_role_logs(HabitRole::Medicine, config::HABIT_VALUE_TRUE, &pattern),
            self.repo.positive_log_counts(&pattern),
            self.repo.list_summaries_for_month(&pattern),
        );

        let avg_completion = or_default("average completion", avg)
            .map(|avg| avg.round() as i64)
            .unwrap_or(0);

        let exercise_days = or_default("exercise days", exercise);

        let medicine_days = or_default("medicine adherence", medicine);
        let medicine_adherence =
            rounded_percent(medicine_days, i64::from(period.elapsed_days(today)));

        let (best_habit, worst_habit) = best_and_worst(or_default("habit ranking", counts));

        let daily_summaries = or_default("daily summaries", summaries);

        Ok(MonthlyReport {
            avg_completion,
            exercise_days,
            medicine_adherence,
            best_habit,
            worst_habit,
            daily_summaries,
        })
    }

    /// Lifetime totals for the dashboard
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.repo.dashboard_stats().await
    }
}

fn or_default<T: Default>(figure: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!("Monthly report: {} unavailable: {}", figure, e);
        T::default()
    })
}

/// Highest and lowest positive-log counts.
///
/// Counts arrive in name order and the sort is stable, so equal counts
/// keep name order.
fn best_and_worst(mut counts: Vec<HabitLogCount>) -> (String, String) {
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    match (counts.first(), counts.last()) {
        (Some(best), Some(worst)) => (best.name.clone(), worst.name.clone()),
        _ => (
            config::NOT_AVAILABLE.to_string(),
            config::NOT_AVAILABLE.to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{
        create_memory_pool, CreateHabitRequest, CreateTaskRequest, HabitType, RepeatType,
    };

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn setup() -> (Repository, ReportService) {
        let pool = create_memory_pool().await.unwrap();
        let repo = Repository::new(pool);
        (repo.clone(), ReportService::new(repo))
    }

    async fn habit(repo: &Repository, name: &str, habit_type: HabitType) -> i64 {
        repo.create_habit(&CreateHabitRequest {
            name: name.to_string(),
            habit_type,
            role: None,
        })
        .await
        .unwrap()
        .id
    }

    #[test]
    fn test_report_month_bounds() {
        let feb_leap = ReportMonth::new(2, 2024).unwrap();
        assert_eq!(feb_leap.days_in_month(), 29);
        assert_eq!(ReportMonth::new(2, 2023).unwrap().days_in_month(), 28);
        assert_eq!(ReportMonth::new(12, 2024).unwrap().days_in_month(), 31);
        assert_eq!(feb_leap.date_pattern(), "2024-02-%");

        assert!(ReportMonth::new(0, 2024).is_err());
        assert!(ReportMonth::new(13, 2024).is_err());
    }

    #[test]
    fn test_elapsed_days() {
        let march = ReportMonth::new(3, 2024).unwrap();
        assert_eq!(march.elapsed_days(day("2024-03-10")), 10);
        assert_eq!(march.elapsed_days(day("2024-04-02")), 31);
        assert_eq!(march.elapsed_days(day("2025-03-10")), 31);

        let feb = ReportMonth::new(2, 2024).unwrap();
        assert_eq!(feb.elapsed_days(day("2024-03-10")), 29);
    }

    #[test]
    fn test_best_and_worst_ties_keep_name_order() {
        let counts = vec![
            HabitLogCount { name: "Exercise".to_string(), count: 3 },
            HabitLogCount { name: "Medicine".to_string(), count: 5 },
            HabitLogCount { name: "Sleep".to_string(), count: 3 },
        ];

        let (best, worst) = best_and_worst(counts);
        assert_eq!(best, "Medicine");
        assert_eq!(worst, "Sleep");

        let (best, worst) = best_and_worst(Vec::new());
        assert_eq!(best, "N/A");
        assert_eq!(worst, "N/A");
    }

    #[tokio::test]
    async fn test_empty_month() {
        let (_repo, service) = setup().await;

        let report = service
            .build_monthly_report_at(3, 2024, day("2024-03-10"))
            .await
            .unwrap();

        assert_eq!(report.avg_completion, 0);
        assert_eq!(report.exercise_days, 0);
        assert_eq!(report.medicine_adherence, 0);
        assert_eq!(report.best_habit, "N/A");
        assert_eq!(report.worst_habit, "N/A");
        assert!(report.daily_summaries.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_month_rejected() {
        let (_repo, service) = setup().await;

        let err = service.build_monthly_report(13, 2024).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_exercise_days_within_month() {
        let (repo, service) = setup().await;
        let exercise = habit(&repo, "Exercise", HabitType::Boolean).await;

        for d in ["2024-03-01", "2024-03-05", "2024-03-09", "2024-03-20", "2024-03-31"] {
            repo.log_habit_value(exercise, day(d), "true").await.unwrap();
        }
        repo.log_habit_value(exercise, day("2024-03-21"), "false")
            .await
            .unwrap();
        repo.log_habit_value(exercise, day("2024-04-01"), "true")
            .await
            .unwrap();

        let report = service
            .build_monthly_report_at(3, 2024, day("2024-04-15"))
            .await
            .unwrap();

        assert_eq!(report.exercise_days, 5);
    }

    #[tokio::test]
    async fn test_medicine_adherence_current_and_past_month() {
        let (repo, service) = setup().await;
        let medicine = habit(&repo, "Medicine", HabitType::Boolean).await;

        for d in 1..=5 {
            let date = NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
            repo.log_habit_value(medicine, date, "true").await.unwrap();
        }
        for d in 1..=29 {
            let date = NaiveDate::from_ymd_opt(2024, 2, d).unwrap();
            let value = if d <= 15 { "true" } else { "false" };
            repo.log_habit_value(medicine, date, value).await.unwrap();
        }

        let today = day("2024-03-10");

        let march = service.build_monthly_report_at(3, 2024, today).await.unwrap();
        assert_eq!(march.medicine_adherence, 50);

        let february = service.build_monthly_report_at(2, 2024, today).await.unwrap();
        assert_eq!(february.medicine_adherence, 52);
    }

    #[tokio::test]
    async fn test_role_not_display_name_drives_report() {
        let (repo, service) = setup().await;
        let run = repo
            .create_habit(&CreateHabitRequest {
                name: "Morning Run".to_string(),
                habit_type: HabitType::Boolean,
                role: Some(HabitRole::Exercise),
            })
            .await
            .unwrap();

        repo.log_habit_value(run.id, day("2024-03-02"), "true")
            .await
            .unwrap();

        let report = service
            .build_monthly_report_at(3, 2024, day("2024-03-10"))
            .await
            .unwrap();
        assert_eq!(report.exercise_days, 1);
        assert_eq!(report.best_habit, "Morning Run");
    }

    #[tokio::test]
    async fn test_full_report() {
        let (repo, service) = setup().await;

        let mut task_ids = Vec::new();
        for title in ["Morning Jog", "Read Book", "Meditation"] {
            let task = repo
                .create_task(&CreateTaskRequest {
                    title: title.to_string(),
                    category: String::new(),
                    task_type: String::new(),
                    start_time: "07:00".to_string(),
                    duration: 15,
                    repeat_type: RepeatType::Daily,
                    reminder: false,
                })
                .await
                .unwrap();
            task_ids.push(task.id);
        }

        // 2/3 on the 10th, 3/3 on the 11th
        repo.toggle_task_completion(task_ids[0], day("2024-03-10"), true)
            .await
            .unwrap();
        repo.toggle_task_completion(task_ids[1], day("2024-03-10"), true)
            .await
            .unwrap();
        for id in &task_ids {
            repo.toggle_task_completion(*id, day("2024-03-11"), true)
                .await
                .unwrap();
        }

        let exercise = habit(&repo, "Exercise", HabitType::Boolean).await;
        let sleep = habit(&repo, "Sleep", HabitType::Value).await;
        let water = habit(&repo, "Water", HabitType::Boolean).await;

        for d in ["2024-03-10", "2024-03-11"] {
            repo.log_habit_value(sleep, day(d), "7").await.unwrap();
            repo.log_habit_value(water, day(d), "false").await.unwrap();
        }
        repo.log_habit_value(sleep, day("2024-03-12"), "6")
            .await
            .unwrap();
        repo.log_habit_value(exercise, day("2024-03-10"), "true")
            .await
            .unwrap();
        repo.log_habit_value(water, day("2024-03-12"), "true")
            .await
            .unwrap();

        let report = service
            .build_monthly_report_at(3, 2024, day("2024-03-12"))
            .await
            .unwrap();

        assert_eq!(report.avg_completion, 84);
        assert_eq!(report.exercise_days, 1);
        assert_eq!(report.medicine_adherence, 0);
        assert_eq!(report.best_habit, "Sleep");
        assert_eq!(report.worst_habit, "Water");

        let dates: Vec<NaiveDate> = report.daily_summaries.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day("2024-03-10"), day("2024-03-11")]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["avgCompletion"], 84);
        assert_eq!(json["dailySummaries"][0]["date"], "2024-03-10");
    }
}
