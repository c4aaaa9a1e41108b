//! In-memory canonical state.
//!
//! Three independent blobs, each persisted under its own key (see
//! `storage::json`). The in-memory copy is authoritative for the session;
//! persistence is best-effort after every mutation.

use serde::{Deserialize, Serialize};
use shared::Theme;

use crate::domain::models::{ActivityLogEntry, Field, Note, Plant, PlantType, Task, WateringLog};

/// Fields collection plus the current selection pointer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldsState {
    pub fields: Vec<Field>,
    pub selected_field_id: Option<String>,
}

/// Plants, the plant type catalog and the watering history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlantsState {
    pub plants: Vec<Plant>,
    pub plant_types: Vec<PlantType>,
    pub watering_logs: Vec<WateringLog>,
    pub selected_plant_id: Option<String>,
}

/// Tasks, notes, the activity feed and UI preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiState {
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub activity_log: Vec<ActivityLogEntry>,
    pub sidebar_collapsed: bool,
    pub theme: Theme,
}
