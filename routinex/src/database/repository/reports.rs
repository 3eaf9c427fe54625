//! Read-only aggregate queries used by the monthly report
//!
//! Every query takes a `LIKE` pattern of the form `YYYY-MM-%`.

use super::Repository;
use crate::config;
use crate::database::models::{DailySummary, HabitLogCount, HabitRole};
use crate::error::Result;

impl Repository {
    /// Mean completion percentage over the month's summary rows, `None` without rows
    pub async fn average_completion(&self, month_pattern: &str) -> Result<Option<f64>> {
        let avg: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(completion_percentage) FROM daily_summary WHERE date LIKE ?",
        )
        .bind(month_pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(avg)
    }

    /// Count logs equal to `value` for habits carrying `role`
    pub async fn count_role_logs(
        &self,
        role: HabitRole,
        value: &str,
        month_pattern: &str,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM health_logs hl
            JOIN habits h ON hl.habit_id = h.id
            WHERE h.role = ? AND hl.value = ? AND hl.date LIKE ?
            "#,
        )
        .bind(role)
        .bind(value)
        .bind(month_pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Positive logs per habit name, in name order.
    ///
    /// Any value other than "false" counts, so numeric entries are positive.
    pub async fn positive_log_counts(&self, month_pattern: &str) -> Result<Vec<HabitLogCount>> {
        let counts = sqlx::query_as::<_, HabitLogCount>(
            r#"
            SELECT h.name AS name, COUNT(*) AS count
            FROM health_logs hl
            JOIN habits h ON hl.habit_id = h.id
            WHERE hl.date LIKE ? AND hl.value != ?
            GROUP BY h.name
            ORDER BY h.name ASC
            "#,
        )
        .bind(month_pattern)
        .bind(config::HABIT_VALUE_FALSE)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Every summary row of the month, oldest first
    pub async fn list_summaries_for_month(&self, month_pattern: &str) -> Result<Vec<DailySummary>> {
        let summaries = sqlx::query_as::<_, DailySummary>(
            r#"
            SELECT * FROM daily_summary WHERE date LIKE ? ORDER BY date ASC
            "#,
        )
        .bind(month_pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }
}
