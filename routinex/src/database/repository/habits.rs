//! Habit and health-log queries

use super::Repository;
use crate::database::models::*;
use crate::error::{AppError, Result};
use chrono::NaiveDate;

impl Repository {
    /// List every habit, oldest first
    pub async fn list_habits(&self) -> Result<Vec<Habit>> {
        let habits = sqlx::query_as::<_, Habit>("SELECT * FROM habits ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(habits)
    }

    /// Create a habit
    pub async fn create_habit(&self, req: &CreateHabitRequest) -> Result<Habit> {
        let habit = sqlx::query_as::<_, Habit>(
            r#"
            INSERT INTO habits (name, type, role) VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(req.name.trim())
        .bind(req.habit_type)
        .bind(req.resolved_role())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created habit: {} ({:?})", habit.id, habit.role);
        Ok(habit)
    }

    /// Delete a habit together with all of its logs.
    ///
    /// Logs are removed first so the foreign key never sees an orphan.
    /// Returns the number of logs removed.
    pub async fn delete_habit(&self, id: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let logs = sqlx::query("DELETE FROM health_logs WHERE habit_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let rows = sqlx::query("DELETE FROM habits WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::habit_not_found(id));
        }

        tx.commit().await?;

        tracing::debug!("Deleted habit {} and {} logs", id, logs);
        Ok(logs)
    }

    /// Health logs for a day across all habits
    pub async fn list_health_logs_for_date(&self, date: NaiveDate) -> Result<Vec<HealthLog>> {
        let logs = sqlx::query_as::<_, HealthLog>(
            r#"
            SELECT * FROM health_logs WHERE date = ? ORDER BY habit_id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    /// Insert or overwrite the value logged for (habit, date)
    pub async fn log_habit_value(
        &self,
        habit_id: i64,
        date: NaiveDate,
        value: &str,
    ) -> Result<HealthLog> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM habits WHERE id = ?")
            .bind(habit_id)
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Err(AppError::habit_not_found(habit_id));
        }

        let log = sqlx::query_as::<_, HealthLog>(
            r#"
            INSERT INTO health_logs (habit_id, date, value) VALUES (?, ?, ?)
            ON CONFLICT(habit_id, date) DO UPDATE SET value = excluded.value
            RETURNING *
            "#,
        )
        .bind(habit_id)
        .bind(date)
        .bind(value)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Logged habit {} on {}: {}", habit_id, date, value);
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::super::create_test_repo;
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn request(name: &str, habit_type: HabitType) -> CreateHabitRequest {
        CreateHabitRequest {
            name: name.to_string(),
            habit_type,
            role: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_role_from_name() {
        let repo = create_test_repo().await;

        let exercise = repo
            .create_habit(&request("Exercise", HabitType::Boolean))
            .await
            .unwrap();
        let sleep = repo
            .create_habit(&request("Sleep", HabitType::Value))
            .await
            .unwrap();

        assert_eq!(exercise.role, HabitRole::Exercise);
        assert_eq!(sleep.role, HabitRole::General);
        assert_eq!(sleep.habit_type, HabitType::Value);

        let habits = repo.list_habits().await.unwrap();
        assert_eq!(habits, vec![exercise, sleep]);
    }

    #[tokio::test]
    async fn test_log_value_upserts() {
        let repo = create_test_repo().await;
        let habit = repo
            .create_habit(&request("Sleep", HabitType::Value))
            .await
            .unwrap();
        let date = day("2024-03-10");

        let first = repo.log_habit_value(habit.id, date, "6").await.unwrap();
        let second = repo.log_habit_value(habit.id, date, "8").await.unwrap();
        assert_eq!(first.id, second.id);

        let logs = repo.list_health_logs_for_date(date).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].value, "8");
    }

    #[tokio::test]
    async fn test_log_value_unknown_habit() {
        let repo = create_test_repo().await;

        let err = repo
            .log_habit_value(3, day("2024-03-10"), "true")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "Habit", .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades_logs() {
        let repo = create_test_repo().await;
        let exercise = repo
            .create_habit(&request("Exercise", HabitType::Boolean))
            .await
            .unwrap();
        let medicine = repo
            .create_habit(&request("Medicine", HabitType::Boolean))
            .await
            .unwrap();

        for d in ["2024-03-09", "2024-03-10"] {
            repo.log_habit_value(exercise.id, day(d), "true").await.unwrap();
            repo.log_habit_value(medicine.id, day(d), "false").await.unwrap();
        }

        let removed = repo.delete_habit(exercise.id).await.unwrap();
        assert_eq!(removed, 2);

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM health_logs WHERE habit_id = ?")
            .bind(exercise.id)
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(orphans, 0);

        let remaining = repo.list_health_logs_for_date(day("2024-03-10")).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].habit_id, medicine.id);
        assert_eq!(repo.list_habits().await.unwrap(), vec![medicine]);
    }

    #[tokio::test]
    async fn test_delete_unknown_habit_rolls_back() {
        let repo = create_test_repo().await;

        let err = repo.delete_habit(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_rolls_back_logs_when_habit_delete_fails() {
        let repo = create_test_repo().await;
        let exercise = repo
            .create_habit(&request("Exercise", HabitType::Boolean))
            .await
            .unwrap();

        for d in ["2024-03-09", "2024-03-10"] {
            repo.log_habit_value(exercise.id, day(d), "true").await.unwrap();
        }

        // Logs are deleted first, then the habit delete aborts
        sqlx::query(
            r#"
            CREATE TRIGGER block_habit_delete BEFORE DELETE ON habits
            BEGIN SELECT RAISE(ABORT, 'habit locked'); END
            "#,
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let err = repo.delete_habit(exercise.id).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        assert_eq!(repo.list_habits().await.unwrap(), vec![exercise.clone()]);
        for d in ["2024-03-09", "2024-03-10"] {
            let logs = repo.list_health_logs_for_date(day(d)).await.unwrap();
            assert_eq!(logs.len(), 1);
            assert_eq!(logs[0].habit_id, exercise.id);
        }
    }
}
