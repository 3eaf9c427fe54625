//! Repository layer for database operations
//!
//! Queries are grouped by entity in submodules; every compound mutation
//! (toggle + summary recompute, habit delete + log cascade, full reset)
//! runs inside one transaction and rolls back if any step fails.

mod habits;
mod reports;
mod summaries;
mod tasks;

pub use summaries::rounded_percent;

use super::models::DashboardStats;
use crate::error::Result;
use sqlx::SqlitePool;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lifetime counts of completed task logs and of habit logs
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let completed_tasks: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM task_logs WHERE completed = 1")
                .fetch_one(&self.pool)
                .await?;

        let habit_logs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM health_logs")
            .fetch_one(&self.pool)
            .await?;

        Ok(DashboardStats {
            completed_tasks,
            habit_logs,
        })
    }

    /// Delete every row of every table. Logs go before their parents.
    pub async fn reset_all_data(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for table in ["task_logs", "health_logs", "daily_summary", "tasks", "habits"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!("Deleted all rows");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) async fn create_test_repo() -> Repository {
    let pool = crate::database::create_memory_pool().await.unwrap();
    Repository::new(pool)
}
