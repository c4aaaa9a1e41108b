use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::NoteType;
use uuid::Uuid;

/// A journal note. The field/zone/plant references are loose: they are not
/// checked against the stores and readers must tolerate dangling ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub note_type: NoteType,
    pub title: Option<String>,
    /// Required, non-empty after trimming.
    pub content: String,
    pub field_id: Option<String>,
    pub zone_id: Option<String>,
    pub plant_id: Option<String>,
    /// Order-preserving set: duplicates removed, first occurrence wins.
    pub tags: Vec<String>,
    /// Photo references. Always empty in this core.
    pub photos: Vec<String>,
    pub is_private: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Note {
    pub fn generate_id() -> String {
        format!("note-{}", Uuid::new_v4())
    }

    /// Deduplicate tags while keeping the first occurrence of each.
    pub fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        tags.into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NoteValidationError {
    #[error("Note content cannot be empty")]
    EmptyContent,
}
