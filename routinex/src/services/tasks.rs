//! Tasks service
//!
//! Validates task input and logs task lifecycle events.
//! Completion toggles always refresh the day's summary.

use crate::database::{CreateTaskRequest, Repository, Task, TaskCompletion, TaskLog};
use crate::error::Result;
use chrono::NaiveDate;

/// Service for managing tasks and their completion logs
#[derive(Clone)]
pub struct TaskService {
    repo: Repository,
}

impl TaskService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// List tasks that have not been deleted
    pub async fn list_active_tasks(&self) -> Result<Vec<Task>> {
        self.repo.list_active_tasks().await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task> {
        self.repo.get_task(id).await
    }

    /// Create a new task
    pub async fn create_task(&self, req: CreateTaskRequest) -> Result<Task> {
        req.validate()?;

        tracing::info!("Creating task: {}", req.title);

        let task = self.repo.create_task(&req).await?;

        tracing::info!("Task created successfully: {}", task.id);

        Ok(task)
    }

    /// Replace a task's fields
    pub async fn update_task(&self, task: Task) -> Result<Task> {
        task.validate()?;

        tracing::debug!("Updating task: {}", task.id);

        self.repo.update_task(&task).await
    }

    /// Delete a task (soft delete, history is kept)
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        tracing::info!("Deleting task: {}", id);

        self.repo.soft_delete_task(id).await?;

        tracing::info!("Task deactivated: {}", id);

        Ok(())
    }

    /// Completion logs for a day, including logs of deleted tasks
    pub async fn get_logs_for_date(&self, date: NaiveDate) -> Result<Vec<TaskLog>> {
        self.repo.list_task_logs_for_date(date).await
    }

    /// Mark a task done or not done for a day
    pub async fn toggle_completion(
        &self,
        task_id: i64,
        date: NaiveDate,
        completed: bool,
    ) -> Result<TaskCompletion> {
        let result = self
            .repo
            .toggle_task_completion(task_id, date, completed)
            .await?;

        tracing::info!(
            "Task {} {} on {}, day at {}%",
            task_id,
            if completed { "completed" } else { "reopened" },
            date,
            result.summary.completion_percentage
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, RepeatType};
    use crate::error::AppError;

    async fn create_test_service() -> TaskService {
        let pool = create_memory_pool().await.unwrap();
        TaskService::new(Repository::new(pool))
    }

    fn request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            category: "Work".to_string(),
            task_type: "Meeting".to_string(),
            start_time: "10:00".to_string(),
            duration: 60,
            repeat_type: RepeatType::Weekly,
            reminder: true,
        }
    }

    #[tokio::test]
    async fn test_empty_title_rejected_before_write() {
        let service = create_test_service().await;

        let err = service.create_task(request("")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(service.list_active_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_long_task_is_created() {
        let service = create_test_service().await;

        let mut req = request(&"Deep work ".repeat(25));
        req.duration = 1500;

        let task = service.create_task(req).await.unwrap();
        assert_eq!(task.duration, 1500);
        assert_eq!(task.title.chars().count(), 249);
    }

    #[tokio::test]
    async fn test_update_validates() {
        let service = create_test_service().await;

        let mut task = service.create_task(request("Team Meeting")).await.unwrap();
        task.title = " ".to_string();

        let err = service.update_task(task).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_toggle_reports_summary() {
        let service = create_test_service().await;
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let a = service.create_task(request("A")).await.unwrap();
        service.create_task(request("B")).await.unwrap();

        let result = service.toggle_completion(a.id, date, true).await.unwrap();
        assert_eq!(result.summary.completion_percentage, 50);
        assert_eq!(result.summary.date, date);
    }
}
