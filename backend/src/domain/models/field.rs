use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::{FieldStatus, SoilType};
use uuid::Uuid;

/// A named sub-area of a field. Zones are owned exclusively by their parent
/// field; the `field_id` back-reference exists for loose references from
/// notes and plants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub field_id: String,
    pub name: String,
    /// Area in square meters.
    pub area: f64,
    pub soil_type: Option<SoilType>,
    pub characteristics: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Zone {
    pub fn generate_id() -> String {
        format!("zone-{}", Uuid::new_v4())
    }
}

/// Domain model for a field. The field `status` is set explicitly by the
/// user and is never derived from its plants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
    /// Area in square meters, always positive.
    pub area: f64,
    pub location: Option<String>,
    pub soil_type: Option<SoilType>,
    pub zones: Vec<Zone>,
    pub notes: Option<String>,
    pub status: FieldStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Field {
    pub fn generate_id() -> String {
        format!("field-{}", Uuid::new_v4())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FieldValidationError {
    #[error("Field name cannot be empty")]
    EmptyName,
    #[error("Field area must be positive")]
    NonPositiveArea,
    #[error("Zone name cannot be empty")]
    EmptyZoneName,
    #[error("Zone area must be positive")]
    NonPositiveZoneArea,
}
