use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared::{PlantHealthStatus, WateringStatus};
use uuid::Uuid;

/// Catalog entry describing a kind of plant. Acts as a template: a plant
/// copies the watering frequency at creation and may override it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantType {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Default watering interval in whole days, always >= 1.
    pub watering_frequency_days: u32,
    /// Days from planting to harvest, where known.
    pub growth_duration_days: Option<u32>,
    pub common_pests: Vec<String>,
    pub care_instructions: Option<String>,
}

impl PlantType {
    pub fn generate_id() -> String {
        format!("ptype-{}", Uuid::new_v4())
    }
}

/// Domain model for a planted crop.
///
/// `health_status` is set explicitly by the user; `watering_status` is
/// derived (see `domain::watering`) and must match the derivation after any
/// mutation that touches watering fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub type_id: String,
    /// Snapshot of the catalog entry at creation time, so later catalog
    /// edits do not rewrite history.
    pub plant_type: PlantType,
    pub field_id: String,
    pub zone_id: Option<String>,
    pub variety: Option<String>,
    /// Number of plants, always >= 1.
    pub quantity: u32,
    pub planted_at: NaiveDate,
    /// Watering interval in whole days, always >= 1. May diverge from the
    /// type's default.
    pub watering_frequency_days: u32,
    pub last_watered_at: Option<NaiveDateTime>,
    pub next_watering_at: Option<NaiveDateTime>,
    pub health_status: PlantHealthStatus,
    pub watering_status: WateringStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Plant {
    pub fn generate_id() -> String {
        format!("plant-{}", Uuid::new_v4())
    }
}

/// One watering of one plant. Append-only: never mutated after creation,
/// deleted only when the parent plant is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WateringLog {
    pub id: String,
    pub plant_id: String,
    pub date: NaiveDateTime,
    /// Liters poured, where recorded. Never negative.
    pub amount_liters: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl WateringLog {
    pub fn generate_id() -> String {
        format!("wl-{}", Uuid::new_v4())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlantValidationError {
    #[error("Plant name cannot be empty")]
    EmptyName,
    #[error("Plant quantity must be at least 1")]
    ZeroQuantity,
    #[error("Watering frequency must be at least 1 day")]
    ZeroFrequency,
    #[error("Watering amount cannot be negative")]
    NegativeAmount,
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Unknown plant type: {0}")]
    UnknownPlantType(String),
}

/// Lookup failure for operations that require an existing plant.
#[derive(Debug, thiserror::Error)]
#[error("Plant not found: {id}")]
pub struct PlantNotFound {
    pub id: String,
}
