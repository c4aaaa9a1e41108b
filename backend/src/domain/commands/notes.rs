use serde::{Deserialize, Serialize};
use shared::NoteType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNoteCommand {
    pub note_type: NoteType,
    pub title: Option<String>,
    /// Required, non-empty after trimming.
    pub content: String,
    pub field_id: Option<String>,
    pub zone_id: Option<String>,
    pub plant_id: Option<String>,
    pub tags: Vec<String>,
    pub is_private: bool,
}

/// Partial update for a note. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateNoteCommand {
    pub note_type: Option<NoteType>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_private: Option<bool>,
}
