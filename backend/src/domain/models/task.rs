use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use shared::{RecurrenceFrequency, TaskPriority, TaskStatus};
use uuid::Uuid;

/// Recurrence rule for a task. Stored verbatim; this core never expands it
/// into occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub frequency: RecurrenceFrequency,
    pub interval: u32,
}

/// Domain model for a task.
///
/// Status transitions: `Pending -> InProgress -> Completed`, and
/// `Pending | InProgress -> Cancelled`. `Completed` and `Cancelled` are
/// terminal, but `complete_task` forces `Completed` unconditionally and the
/// transitions are not otherwise validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub due_time: Option<NaiveTime>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub field_id: Option<String>,
    pub plant_id: Option<String>,
    pub recurrence: Option<Recurrence>,
    /// Set only on the transition to `Completed`.
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Task {
    pub fn generate_id() -> String {
        format!("task-{}", Uuid::new_v4())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TaskValidationError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
}
