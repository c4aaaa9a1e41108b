use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shared::{TaskPriority, TaskStatus};

use crate::domain::models::Recurrence;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskCommand {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub due_time: Option<NaiveTime>,
    pub priority: TaskPriority,
    pub field_id: Option<String>,
    pub plant_id: Option<String>,
    pub recurrence: Option<Recurrence>,
}

/// Partial update for a task. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateTaskCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub field_id: Option<String>,
    pub plant_id: Option<String>,
    pub recurrence: Option<Recurrence>,
}
