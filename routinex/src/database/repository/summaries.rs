//! Daily summary maintenance
//!
//! A summary row caches the share of active tasks completed on one date.
//! It is rewritten only when that date's completion changes, so older rows
//! keep the active-task count from the time they were written.

use super::Repository;
use crate::database::models::DailySummary;
use crate::error::Result;
use chrono::NaiveDate;
use sqlx::SqliteConnection;

/// `round(100 * part / whole)` with halves rounded up, or 0 when `whole` is 0.
pub fn rounded_percent(part: i64, whole: i64) -> i64 {
    if whole <= 0 {
        return 0;
    }

    (200 * part + whole) / (2 * whole)
}

/// Recompute and upsert the summary for `date` on an open connection or transaction.
///
/// Completed logs of soft-deleted tasks still count while the denominator
/// only counts active tasks, so the percentage can exceed 100 after a
/// completed task is deleted.
pub(super) async fn recompute_in(conn: &mut SqliteConnection, date: NaiveDate) -> Result<DailySummary> {
    let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE is_active = 1")
        .fetch_one(&mut *conn)
        .await?;

    let completed: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM task_logs WHERE date = ? AND completed = 1")
            .bind(date)
            .fetch_one(&mut *conn)
            .await?;

    let percentage = rounded_percent(completed, active);

    let summary = sqlx::query_as::<_, DailySummary>(
        r#"
        INSERT INTO daily_summary (date, completion_percentage) VALUES (?, ?)
        ON CONFLICT(date) DO UPDATE SET completion_percentage = excluded.completion_percentage
        RETURNING *
        "#,
    )
    .bind(date)
    .bind(percentage)
    .fetch_one(&mut *conn)
    .await?;

    Ok(summary)
}

impl Repository {
    /// Recompute the summary for one date from current task state
    pub async fn recompute_summary(&self, date: NaiveDate) -> Result<DailySummary> {
        let mut tx = self.pool.begin().await?;
        let summary = recompute_in(&mut tx, date).await?;
        tx.commit().await?;

        tracing::debug!(
            "Recomputed summary for {}: {}%",
            date,
            summary.completion_percentage
        );
        Ok(summary)
    }

    /// Get the cached summary for a date, if one was ever written
    pub async fn get_summary(&self, date: NaiveDate) -> Result<Option<DailySummary>> {
        let summary =
            sqlx::query_as::<_, DailySummary>("SELECT * FROM daily_summary WHERE date = ?")
                .bind(date)
                .fetch_optional(&self.pool)
                .await?;

        Ok(summary)
    }

    /// Summaries between two dates inclusive, oldest first
    pub async fn list_summaries_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySummary>> {
        let summaries = sqlx::query_as::<_, DailySummary>(
            r#"
            SELECT * FROM daily_summary
            WHERE date BETWEEN ? AND ?
            ORDER BY date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }
}
