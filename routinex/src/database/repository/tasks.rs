//! Task and task-log queries

use super::summaries::recompute_in;
use super::Repository;
use crate::database::models::*;
use crate::error::{AppError, Result};
use chrono::{NaiveDate, Utc};

impl Repository {
    /// List tasks that have not been soft-deleted, oldest first
    pub async fn list_active_tasks(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks WHERE is_active = 1 ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Get a task by ID, active or not
    pub async fn get_task(&self, id: i64) -> Result<Task> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::task_not_found(id))
    }

    /// Create a new active task
    pub async fn create_task(&self, req: &CreateTaskRequest) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, category, type, start_time, duration, repeat_type, reminder, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?, 1)
            RETURNING *
            "#,
        )
        .bind(req.title.trim())
        .bind(&req.category)
        .bind(&req.task_type)
        .bind(&req.start_time)
        .bind(req.duration)
        .bind(req.repeat_type)
        .bind(req.reminder)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created task: {}", task.id);
        Ok(task)
    }

    /// Replace every column of an existing task
    pub async fn update_task(&self, task: &Task) -> Result<Task> {
        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = ?, category = ?, type = ?, start_time = ?, duration = ?,
                repeat_type = ?, reminder = ?, is_active = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(task.title.trim())
        .bind(&task.category)
        .bind(&task.task_type)
        .bind(&task.start_time)
        .bind(task.duration)
        .bind(task.repeat_type)
        .bind(task.reminder)
        .bind(task.is_active)
        .bind(task.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::task_not_found(task.id))?;

        tracing::debug!("Updated task: {}", task.id);
        Ok(updated)
    }

    /// Soft delete a task. Deleting an inactive task again is a no-op.
    pub async fn soft_delete_task(&self, id: i64) -> Result<()> {
        let rows = sqlx::query("UPDATE tasks SET is_active = 0 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::task_not_found(id));
        }

        tracing::debug!("Soft deleted task: {}", id);
        Ok(())
    }

    /// Task logs for a day, including logs of soft-deleted tasks
    pub async fn list_task_logs_for_date(&self, date: NaiveDate) -> Result<Vec<TaskLog>> {
        let logs = sqlx::query_as::<_, TaskLog>(
            r#"
            SELECT * FROM task_logs WHERE date = ? ORDER BY task_id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    /// Upsert the (task, date) log and recompute that date's summary.
    ///
    /// Both writes commit together or not at all.
    pub async fn toggle_task_completion(
        &self,
        task_id: i64,
        date: NaiveDate,
        completed: bool,
    ) -> Result<TaskCompletion> {
        let completed_at = completed.then(Utc::now);

        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM tasks WHERE id = ?")
            .bind(task_id)
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Err(AppError::task_not_found(task_id));
        }

        let log = sqlx::query_as::<_, TaskLog>(
            r#"
            INSERT INTO task_logs (task_id, date, completed, completed_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(task_id, date) DO UPDATE
            SET completed = excluded.completed, completed_at = excluded.completed_at
            RETURNING *
            "#,
        )
        .bind(task_id)
        .bind(date)
        .bind(completed)
        .bind(completed_at)
        .fetch_one(&mut *tx)
        .await?;

        let summary = recompute_in(&mut tx, date).await?;

        tx.commit().await?;

        tracing::debug!(
            "Task {} on {} set completed={} ({}%)",
            task_id,
            date,
            completed,
            summary.completion_percentage
        );

        Ok(TaskCompletion { log, summary })
    }
}
