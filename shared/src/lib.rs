use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall status of a field, set explicitly by the user (never derived).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Healthy,
    Attention,
    Critical,
}

/// Health of a plant, set explicitly by the user (never derived).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantHealthStatus {
    Healthy,
    Sick,
    Observation,
    Dead,
}

/// Watering urgency bucket, derived from watering history and frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WateringStatus {
    Watered,
    DueSoon,
    Overdue,
    Critical,
}

impl WateringStatus {
    /// Sort rank for urgency ordering: lower is more urgent.
    pub fn urgency_rank(&self) -> u8 {
        match self {
            WateringStatus::Critical => 0,
            WateringStatus::Overdue => 1,
            WateringStatus::DueSoon => 2,
            WateringStatus::Watered => 3,
        }
    }

    /// Whether this status should surface in the notification badge.
    pub fn is_urgent(&self) -> bool {
        matches!(self, WateringStatus::Overdue | WateringStatus::Critical)
    }
}

impl fmt::Display for WateringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WateringStatus::Watered => "watered",
            WateringStatus::DueSoon => "due_soon",
            WateringStatus::Overdue => "overdue",
            WateringStatus::Critical => "critical",
        };
        write!(f, "{}", label)
    }
}

/// Category of a journal note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    Watering,
    Growth,
    Pest,
    Disease,
    Fertilizer,
    Weather,
    Work,
    Observation,
    Harvest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Clay,
    Sandy,
    Loam,
    Silt,
    Peat,
    Chalk,
}

/// Recurrence frequency for a task rule. The rule is stored verbatim;
/// expansion into occurrences is not part of this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

/// Category of an activity feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Watering,
    Planting,
    Harvest,
    Note,
    Task,
    Field,
    Plant,
    Problem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    Complete,
}

/// Kind of entity an activity entry points back at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Field,
    Plant,
    Note,
    Task,
}

/// Headline numbers for the dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_fields: usize,
    /// Sum of plant quantities, not the number of plant records.
    pub total_plants: u32,
    pub plants_needing_water: usize,
    pub overdue_waterings: usize,
    pub critical_waterings: usize,
    pub problem_plants: usize,
    pub tasks_today: usize,
    pub tasks_pending: usize,
}

/// A plant watering due on a given calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WateringEvent {
    pub plant_id: String,
    pub plant_name: String,
    pub field_id: String,
    pub status: WateringStatus,
}

/// A task due on a given calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEvent {
    pub task_id: String,
    pub title: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

/// Everything scheduled on one calendar day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayEvents {
    pub waterings: Vec<WateringEvent>,
    pub tasks: Vec<TaskEvent>,
}

impl DayEvents {
    pub fn is_empty(&self) -> bool {
        self.waterings.is_empty() && self.tasks.is_empty()
    }
}

/// Type of calendar day for explicit rendering logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarDayType {
    /// Empty padding cell before the first day of the month.
    PaddingBefore,
    /// Actual day within the month.
    MonthDay,
}

/// A single cell in the month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// Day of month, 0 for padding cells.
    pub day: u32,
    pub day_type: CalendarDayType,
    pub events: DayEvents,
}

/// A month grid of day cells with leading padding for weekday alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: u32,
    pub days: Vec<CalendarDay>,
    /// Weekday of the 1st: 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u32,
}

/// The month/year a calendar view is focused on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarFocusDate {
    pub month: u32,
    pub year: u32,
}

impl Default for CalendarFocusDate {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year() as u32,
        }
    }
}

/// Filter axes for the plants list. Empty filters match everything.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlantFilters {
    pub field_id: Option<String>,
    pub zone_id: Option<String>,
    pub type_id: Option<String>,
    pub health_status: Option<PlantHealthStatus>,
    pub watering_status: Option<WateringStatus>,
    pub search_query: Option<String>,
}

/// A plant urgent enough to appear in the notification dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgentWatering {
    pub plant_id: String,
    pub plant_name: String,
    pub field_id: String,
    pub status: WateringStatus,
}

/// A recent activity entry as shown in the notification dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    pub activity_type: ActivityType,
    pub action: ActivityAction,
    pub description: String,
    pub timestamp: String,
}

/// Notification surface: urgent waterings plus recent activity.
///
/// The badge counts urgent plants only; activity entries are informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsSummary {
    /// Most urgent first, capped at 5.
    pub urgent: Vec<UrgentWatering>,
    /// Most recent first, capped at 5.
    pub recent_activity: Vec<ActivityItem>,
    /// Total count of urgent plants, not capped.
    pub badge_count: usize,
}
