//! Task-related commands
//!
//! CRUD operations and per-day completion for tasks.

use super::parse_date;
use crate::app::AppState;
use crate::database::{CreateTaskRequest, Task, TaskCompletion, TaskLog};
use crate::error::Result;

/// List all active tasks
pub async fn list_tasks(state: &AppState) -> Result<Vec<Task>> {
    state.tasks_service.list_active_tasks().await
}

/// Get a task by ID, including deleted tasks
pub async fn get_task(state: &AppState, id: i64) -> Result<Task> {
    state.tasks_service.get_task(id).await
}

/// Create a new task
pub async fn create_task(state: &AppState, req: CreateTaskRequest) -> Result<Task> {
    state.tasks_service.create_task(req).await
}

/// Replace every field of a task
pub async fn update_task(state: &AppState, task: Task) -> Result<Task> {
    state.tasks_service.update_task(task).await
}

/// Soft delete a task
pub async fn delete_task(state: &AppState, id: i64) -> Result<()> {
    state.tasks_service.delete_task(id).await
}

/// Completion logs for a day
pub async fn get_task_logs(state: &AppState, date: String) -> Result<Vec<TaskLog>> {
    let date = parse_date(&date)?;
    state.tasks_service.get_logs_for_date(date).await
}

/// Mark a task completed or not for a day
pub async fn toggle_task_completion(
    state: &AppState,
    task_id: i64,
    date: String,
    completed: bool,
) -> Result<TaskCompletion> {
    let date = parse_date(&date)?;
    state
        .tasks_service
        .toggle_completion(task_id, date, completed)
        .await
}
