//! Journal notes: CRUD plus the loose-reference queries used by the plant
//! and field detail views. Note references are never checked against the
//! stores; a dangling id simply matches nothing.

use anyhow::Result;
use chrono::Local;
use log::warn;
use shared::{ActivityAction, ActivityType, EntityKind};
use std::sync::{Arc, Mutex};

use crate::domain::activity_service::ActivityService;
use crate::domain::commands::notes::{CreateNoteCommand, UpdateNoteCommand};
use crate::domain::models::{Note, NoteValidationError};
use crate::domain::state::UiState;
use crate::storage::UiStateRepository;

#[derive(Clone)]
pub struct NoteService {
    state: Arc<Mutex<UiState>>,
    repository: UiStateRepository,
    activity: ActivityService,
}

impl NoteService {
    pub fn new(
        state: Arc<Mutex<UiState>>,
        repository: UiStateRepository,
        activity: ActivityService,
    ) -> Self {
        Self {
            state,
            repository,
            activity,
        }
    }

    pub fn create_note(&self, command: CreateNoteCommand) -> Result<Note> {
        if command.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent.into());
        }

        let now = Local::now().naive_local();
        let note = Note {
            id: Note::generate_id(),
            note_type: command.note_type,
            title: command.title,
            content: command.content.trim().to_string(),
            field_id: command.field_id,
            zone_id: command.zone_id,
            plant_id: command.plant_id,
            tags: Note::dedupe_tags(command.tags),
            photos: Vec::new(),
            is_private: command.is_private,
            created_at: now,
            updated_at: now,
        };

        {
            let mut ui = self.state.lock().unwrap();
            ui.notes.push(note.clone());
            self.persist(&ui);
        }

        self.activity.record(
            ActivityType::Note,
            ActivityAction::Create,
            note.title
                .as_deref()
                .map(|t| format!("Added note \"{}\"", t))
                .unwrap_or_else(|| "Added a note".to_string()),
            Some((EntityKind::Note, &note.id)),
        );
        Ok(note)
    }

    /// Returns `false` when the id is unknown.
    pub fn update_note(&self, id: &str, command: UpdateNoteCommand) -> Result<bool> {
        if let Some(ref content) = command.content {
            if content.trim().is_empty() {
                return Err(NoteValidationError::EmptyContent.into());
            }
        }

        {
            let mut ui = self.state.lock().unwrap();
            let note = match ui.notes.iter_mut().find(|n| n.id == id) {
                Some(n) => n,
                None => return Ok(false),
            };

            if let Some(note_type) = command.note_type {
                note.note_type = note_type;
            }
            if let Some(title) = command.title {
                note.title = Some(title);
            }
            if let Some(content) = command.content {
                note.content = content.trim().to_string();
            }
            if let Some(tags) = command.tags {
                note.tags = Note::dedupe_tags(tags);
            }
            if let Some(is_private) = command.is_private {
                note.is_private = is_private;
            }
            note.updated_at = Local::now().naive_local();
            self.persist(&ui);
        }

        self.activity.record(
            ActivityType::Note,
            ActivityAction::Update,
            "Updated a note",
            Some((EntityKind::Note, id)),
        );
        Ok(true)
    }

    /// Returns `false` when the id is unknown.
    pub fn delete_note(&self, id: &str) -> Result<bool> {
        {
            let mut ui = self.state.lock().unwrap();
            let Some(position) = ui.notes.iter().position(|n| n.id == id) else {
                return Ok(false);
            };
            ui.notes.remove(position);
            self.persist(&ui);
        }

        self.activity.record(
            ActivityType::Note,
            ActivityAction::Delete,
            "Deleted a note",
            Some((EntityKind::Note, id)),
        );
        Ok(true)
    }

    pub fn get_note(&self, id: &str) -> Option<Note> {
        let ui = self.state.lock().unwrap();
        ui.notes.iter().find(|n| n.id == id).cloned()
    }

    pub fn list_notes(&self) -> Vec<Note> {
        self.state.lock().unwrap().notes.clone()
    }

    pub fn notes_by_plant(&self, plant_id: &str) -> Vec<Note> {
        let ui = self.state.lock().unwrap();
        ui.notes
            .iter()
            .filter(|n| n.plant_id.as_deref() == Some(plant_id))
            .cloned()
            .collect()
    }

    pub fn notes_by_field(&self, field_id: &str) -> Vec<Note> {
        let ui = self.state.lock().unwrap();
        ui.notes
            .iter()
            .filter(|n| n.field_id.as_deref() == Some(field_id))
            .cloned()
            .collect()
    }

    fn persist(&self, state: &UiState) {
        if let Err(e) = self.repository.save(state) {
            warn!("Failed to persist UI state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::MemoryBlobStore;
    use shared::NoteType;

    fn service() -> NoteService {
        let store = Arc::new(MemoryBlobStore::default());
        let state = Arc::new(Mutex::new(UiState::default()));
        let activity = ActivityService::new(state.clone(), UiStateRepository::new(store.clone()));
        NoteService::new(state, UiStateRepository::new(store), activity)
    }

    fn pest_note() -> CreateNoteCommand {
        CreateNoteCommand {
            note_type: NoteType::Pest,
            title: Some("Aphids".to_string()),
            content: "  Aphids on the lower leaves.  ".to_string(),
            field_id: Some("field-1".to_string()),
            zone_id: None,
            plant_id: Some("plant-1".to_string()),
            tags: vec![
                "pest".to_string(),
                "urgent".to_string(),
                "pest".to_string(),
            ],
            is_private: false,
        }
    }

    #[test]
    fn test_create_note_trims_content_and_dedupes_tags() {
        let service = service();
        let note = service.create_note(pest_note()).unwrap();
        assert_eq!(note.content, "Aphids on the lower leaves.");
        assert_eq!(note.tags, vec!["pest".to_string(), "urgent".to_string()]);
        assert!(note.photos.is_empty());
    }

    #[test]
    fn test_create_note_rejects_blank_content() {
        let service = service();
        let mut cmd = pest_note();
        cmd.content = "   ".to_string();
        assert!(service.create_note(cmd).is_err());
    }

    #[test]
    fn test_update_note_merges_and_refreshes_updated_at() {
        let service = service();
        let note = service.create_note(pest_note()).unwrap();

        assert!(service
            .update_note(
                &note.id,
                UpdateNoteCommand {
                    content: Some("Aphids gone after soap spray.".to_string()),
                    is_private: Some(true),
                    ..Default::default()
                },
            )
            .unwrap());

        let stored = service.get_note(&note.id).unwrap();
        assert_eq!(stored.content, "Aphids gone after soap spray.");
        assert!(stored.is_private);
        assert_eq!(stored.note_type, NoteType::Pest);
        assert!(stored.updated_at >= stored.created_at);
    }

    #[test]
    fn test_update_unknown_note_is_observable_noop() {
        let service = service();
        assert!(!service
            .update_note("note-missing", UpdateNoteCommand::default())
            .unwrap());
    }

    #[test]
    fn test_loose_reference_queries() {
        let service = service();
        service.create_note(pest_note()).unwrap();
        let mut other = pest_note();
        other.plant_id = Some("plant-2".to_string());
        other.field_id = None;
        service.create_note(other).unwrap();

        assert_eq!(service.notes_by_plant("plant-1").len(), 1);
        assert_eq!(service.notes_by_field("field-1").len(), 1);
        // Dangling references simply match nothing.
        assert!(service.notes_by_field("field-gone").is_empty());
    }

    #[test]
    fn test_delete_note() {
        let service = service();
        let note = service.create_note(pest_note()).unwrap();
        assert!(service.delete_note(&note.id).unwrap());
        assert!(service.get_note(&note.id).is_none());
        assert!(!service.delete_note(&note.id).unwrap());
    }
}
