//! Task management.
//!
//! Status transitions are `Pending -> InProgress -> Completed` with
//! `Cancelled` reachable from the two non-terminal states, but none of this
//! is enforced: `complete_task` forces `Completed` unconditionally, matching
//! the observed behavior this core preserves.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::warn;
use shared::{ActivityAction, ActivityType, EntityKind, TaskStatus};
use std::sync::{Arc, Mutex};

use crate::domain::activity_service::ActivityService;
use crate::domain::commands::tasks::{CreateTaskCommand, UpdateTaskCommand};
use crate::domain::models::{Task, TaskValidationError};
use crate::domain::state::UiState;
use crate::storage::UiStateRepository;

#[derive(Clone)]
pub struct TaskService {
    state: Arc<Mutex<UiState>>,
    repository: UiStateRepository,
    activity: ActivityService,
}

impl TaskService {
    pub fn new(
        state: Arc<Mutex<UiState>>,
        repository: UiStateRepository,
        activity: ActivityService,
    ) -> Self {
        Self {
            state,
            repository,
            activity,
        }
    }

    pub fn create_task(&self, command: CreateTaskCommand) -> Result<Task> {
        if command.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle.into());
        }

        let now = Local::now().naive_local();
        let task = Task {
            id: Task::generate_id(),
            title: command.title.trim().to_string(),
            description: command.description,
            due_date: command.due_date,
            due_time: command.due_time,
            priority: command.priority,
            status: TaskStatus::Pending,
            field_id: command.field_id,
            plant_id: command.plant_id,
            recurrence: command.recurrence,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };

        {
            let mut ui = self.state.lock().unwrap();
            ui.tasks.push(task.clone());
            self.persist(&ui);
        }

        self.activity.record(
            ActivityType::Task,
            ActivityAction::Create,
            format!("Added task \"{}\"", task.title),
            Some((EntityKind::Task, &task.id)),
        );
        Ok(task)
    }

    /// Returns `false` when the id is unknown.
    pub fn update_task(&self, id: &str, command: UpdateTaskCommand) -> Result<bool> {
        if let Some(ref title) = command.title {
            if title.trim().is_empty() {
                return Err(TaskValidationError::EmptyTitle.into());
            }
        }

        let updated_title = {
            let mut ui = self.state.lock().unwrap();
            let task = match ui.tasks.iter_mut().find(|t| t.id == id) {
                Some(t) => t,
                None => return Ok(false),
            };

            if let Some(title) = command.title {
                task.title = title.trim().to_string();
            }
            if let Some(description) = command.description {
                task.description = Some(description);
            }
            if let Some(due_date) = command.due_date {
                task.due_date = due_date;
            }
            if let Some(due_time) = command.due_time {
                task.due_time = Some(due_time);
            }
            if let Some(priority) = command.priority {
                task.priority = priority;
            }
            if let Some(status) = command.status {
                task.status = status;
            }
            if let Some(field_id) = command.field_id {
                task.field_id = Some(field_id);
            }
            if let Some(plant_id) = command.plant_id {
                task.plant_id = Some(plant_id);
            }
            if let Some(recurrence) = command.recurrence {
                task.recurrence = Some(recurrence);
            }
            task.updated_at = Local::now().naive_local();
            let title = task.title.clone();
            self.persist(&ui);
            title
        };

        self.activity.record(
            ActivityType::Task,
            ActivityAction::Update,
            format!("Updated task \"{}\"", updated_title),
            Some((EntityKind::Task, id)),
        );
        Ok(true)
    }

    /// Force the task to `Completed` and stamp `completed_at`. No check
    /// that the current status permits the transition. Returns `false`
    /// when the id is unknown.
    pub fn complete_task(&self, id: &str) -> Result<bool> {
        let completed_title = {
            let mut ui = self.state.lock().unwrap();
            let task = match ui.tasks.iter_mut().find(|t| t.id == id) {
                Some(t) => t,
                None => return Ok(false),
            };
            let now = Local::now().naive_local();
            task.status = TaskStatus::Completed;
            task.completed_at = Some(now);
            task.updated_at = now;
            let title = task.title.clone();
            self.persist(&ui);
            title
        };

        self.activity.record(
            ActivityType::Task,
            ActivityAction::Complete,
            format!("Completed task \"{}\"", completed_title),
            Some((EntityKind::Task, id)),
        );
        Ok(true)
    }

    /// Returns `false` when the id is unknown.
    pub fn delete_task(&self, id: &str) -> Result<bool> {
        {
            let mut ui = self.state.lock().unwrap();
            let Some(position) = ui.tasks.iter().position(|t| t.id == id) else {
                return Ok(false);
            };
            ui.tasks.remove(position);
            self.persist(&ui);
        }

        self.activity.record(
            ActivityType::Task,
            ActivityAction::Delete,
            "Deleted a task",
            Some((EntityKind::Task, id)),
        );
        Ok(true)
    }

    pub fn get_task(&self, id: &str) -> Option<Task> {
        let ui = self.state.lock().unwrap();
        ui.tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn list_tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    /// Tasks due on `date` that are not completed.
    pub fn tasks_for_day(&self, date: NaiveDate) -> Vec<Task> {
        let ui = self.state.lock().unwrap();
        ui.tasks
            .iter()
            .filter(|t| t.due_date == date && t.status != TaskStatus::Completed)
            .cloned()
            .collect()
    }

    pub fn pending_tasks(&self) -> Vec<Task> {
        let ui = self.state.lock().unwrap();
        ui.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending)
            .cloned()
            .collect()
    }

    /// Tasks due before `today` that are not completed.
    pub fn overdue_tasks(&self, today: NaiveDate) -> Vec<Task> {
        let ui = self.state.lock().unwrap();
        ui.tasks
            .iter()
            .filter(|t| t.due_date < today && t.status != TaskStatus::Completed)
            .cloned()
            .collect()
    }

    fn persist(&self, state: &UiState) {
        if let Err(e) = self.repository.save(state) {
            warn!("Failed to persist UI state: {}", e);
        }
    }
}
