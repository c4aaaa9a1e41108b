use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared::PlantHealthStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlantCommand {
    pub name: String,
    pub type_id: String,
    /// Must reference an existing field.
    pub field_id: String,
    pub zone_id: Option<String>,
    pub variety: Option<String>,
    /// Must be at least 1.
    pub quantity: u32,
    pub planted_at: NaiveDate,
    /// Overrides the type's default interval when set. Must be at least 1.
    pub watering_frequency_days: Option<u32>,
    pub health_status: PlantHealthStatus,
    pub notes: Option<String>,
}

/// Partial update for a plant. `None` fields are left unchanged.
///
/// Changing `watering_frequency_days`, `last_watered_at` or
/// `next_watering_at` triggers a recompute of the derived watering status.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdatePlantCommand {
    pub name: Option<String>,
    pub field_id: Option<String>,
    pub zone_id: Option<String>,
    pub variety: Option<String>,
    pub quantity: Option<u32>,
    pub watering_frequency_days: Option<u32>,
    pub last_watered_at: Option<NaiveDateTime>,
    pub next_watering_at: Option<NaiveDateTime>,
    pub health_status: Option<PlantHealthStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddPlantTypeCommand {
    pub name: String,
    pub category: String,
    /// Must be at least 1.
    pub watering_frequency_days: u32,
    pub growth_duration_days: Option<u32>,
    pub common_pests: Vec<String>,
    pub care_instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WaterPlantCommand {
    pub notes: Option<String>,
    /// Liters poured. Must not be negative when set.
    pub amount_liters: Option<f64>,
}
