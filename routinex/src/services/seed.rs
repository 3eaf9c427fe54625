//! Demo data
//!
//! Fills an empty database with a handful of tasks and habits plus a week
//! of randomly completed logs, going through the regular services so the
//! daily summaries come out the same way real toggles produce them.

use crate::config;
use crate::database::{CreateTaskRequest, HabitType, RepeatType};
use crate::error::Result;
use crate::services::{HabitService, TaskService};
use chrono::{Duration, NaiveDate};
use rand::Rng;

struct DemoTask {
    title: &'static str,
    category: &'static str,
    task_type: &'static str,
    start_time: &'static str,
    duration: i64,
    repeat_type: RepeatType,
    reminder: bool,
}

const DEMO_TASKS: &[DemoTask] = &[
    DemoTask { title: "Morning Jog", category: "Health", task_type: "Exercise", start_time: "07:00", duration: 30, repeat_type: RepeatType::Daily, reminder: true },
    DemoTask { title: "Read Book", category: "Learning", task_type: "Study", start_time: "20:00", duration: 45, repeat_type: RepeatType::Daily, reminder: true },
    DemoTask { title: "Drink Water", category: "Health", task_type: "Hydration", start_time: "08:00", duration: 0, repeat_type: RepeatType::Daily, reminder: false },
    DemoTask { title: "Team Meeting", category: "Work", task_type: "Meeting", start_time: "10:00", duration: 60, repeat_type: RepeatType::Weekly, reminder: true },
    DemoTask { title: "Meditation", category: "Health", task_type: "Mental", start_time: "06:30", duration: 15, repeat_type: RepeatType::Daily, reminder: true },
];

/// Habit name whose demo logs are hours slept rather than true/false
const VALUE_HABIT: &str = "Sleep";

const DEMO_HABITS: &[(&str, HabitType)] = &[
    (config::EXERCISE_HABIT_NAME, HabitType::Boolean),
    (config::MEDICINE_HABIT_NAME, HabitType::Boolean),
    (VALUE_HABIT, HabitType::Value),
];

/// Insert demo data unless any active task or habit already exists.
///
/// Returns whether anything was inserted.
pub async fn seed_demo_data<R: Rng + Send>(
    tasks: &TaskService,
    habits: &HabitService,
    today: NaiveDate,
    rng: &mut R,
) -> Result<bool> {
    if !tasks.list_active_tasks().await?.is_empty() || !habits.list_habits().await?.is_empty() {
        tracing::info!("Demo data already exists, skipping");
        return Ok(false);
    }

    tracing::info!("Inserting demo data");

    let mut task_ids = Vec::with_capacity(DEMO_TASKS.len());
    for demo in DEMO_TASKS {
        let task = tasks
            .create_task(CreateTaskRequest {
                title: demo.title.to_string(),
                category: demo.category.to_string(),
                task_type: demo.task_type.to_string(),
                start_time: demo.start_time.to_string(),
                duration: demo.duration,
                repeat_type: demo.repeat_type,
                reminder: demo.reminder,
            })
            .await?;
        task_ids.push(task.id);
    }

    let mut demo_habits = Vec::with_capacity(DEMO_HABITS.len());
    for (name, habit_type) in DEMO_HABITS {
        demo_habits.push(habits.create_habit(name.to_string(), *habit_type).await?);
    }

    for offset in 0..config::DEMO_HISTORY_DAYS {
        let date = today - Duration::days(offset);

        for task_id in &task_ids {
            let completed = rng.gen_bool(config::DEMO_TASK_COMPLETION_RATE);
            tasks.toggle_completion(*task_id, date, completed).await?;
        }

        for habit in &demo_habits {
            let value = if habit.name == VALUE_HABIT {
                rng.gen_range(5..=8).to_string()
            } else if rng.gen_bool(config::DEMO_HABIT_SUCCESS_RATE) {
                config::HABIT_VALUE_TRUE.to_string()
            } else {
                config::HABIT_VALUE_FALSE.to_string()
            };
            habits.log_value(habit.id, date, &value).await?;
        }
    }

    tracing::info!(
        "Demo data inserted: {} tasks, {} habits, {} days",
        task_ids.len(),
        demo_habits.len(),
        config::DEMO_HISTORY_DAYS
    );

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, Repository};
    use crate::services::SummaryService;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_seed_once() {
        let pool = create_memory_pool().await.unwrap();
        let repo = Repository::new(pool);
        let tasks = TaskService::new(repo.clone());
        let habits = HabitService::new(repo.clone());
        let summaries = SummaryService::new(repo);
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        assert!(seed_demo_data(&tasks, &habits, today, &mut rng).await.unwrap());
        assert!(!seed_demo_data(&tasks, &habits, today, &mut rng).await.unwrap());

        assert_eq!(tasks.list_active_tasks().await.unwrap().len(), 5);
        assert_eq!(habits.list_habits().await.unwrap().len(), 3);

        let week = summaries
            .calendar(today - Duration::days(6), today)
            .await
            .unwrap();
        assert_eq!(week.len(), 7);

        for summary in &week {
            let completed = tasks
                .get_logs_for_date(summary.date)
                .await
                .unwrap()
                .iter()
                .filter(|log| log.completed)
                .count() as i64;
            assert_eq!(summary.completion_percentage, completed * 20);
        }

        let logs = habits.get_logs_for_date(today).await.unwrap();
        assert_eq!(logs.len(), 3);
    }
}
