use serde::{Deserialize, Serialize};
use shared::{FieldStatus, SoilType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFieldCommand {
    pub name: String,
    /// Area in square meters, must be positive.
    pub area: f64,
    pub location: Option<String>,
    pub soil_type: Option<SoilType>,
    pub notes: Option<String>,
    pub status: FieldStatus,
}

/// Partial update for a field. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateFieldCommand {
    pub name: Option<String>,
    pub area: Option<f64>,
    pub location: Option<String>,
    pub soil_type: Option<SoilType>,
    pub notes: Option<String>,
    pub status: Option<FieldStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddZoneCommand {
    pub name: String,
    pub area: f64,
    pub soil_type: Option<SoilType>,
    pub characteristics: Option<String>,
}

/// Partial update for a zone. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateZoneCommand {
    pub name: Option<String>,
    pub area: Option<f64>,
    pub soil_type: Option<SoilType>,
    pub characteristics: Option<String>,
}
