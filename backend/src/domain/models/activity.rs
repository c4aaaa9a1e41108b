use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::{ActivityAction, ActivityType, EntityKind};
use uuid::Uuid;

/// One entry in the activity feed. Append-only; the feed keeps the most
/// recent 100 entries and evicts the oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: String,
    pub activity_type: ActivityType,
    pub action: ActivityAction,
    pub description: String,
    pub entity_id: Option<String>,
    pub entity_kind: Option<EntityKind>,
    pub timestamp: NaiveDateTime,
}

impl ActivityLogEntry {
    pub fn generate_id() -> String {
        format!("act-{}", Uuid::new_v4())
    }
}
