//! Field management: CRUD for fields and their zones.
//!
//! Fields own their zones exclusively. Deleting a field does NOT cascade to
//! plants referencing it; readers tolerate the dangling `field_id` as an
//! unknown field.

use anyhow::Result;
use chrono::Local;
use log::{info, warn};
use shared::{ActivityAction, ActivityType, EntityKind};
use std::sync::{Arc, Mutex};

use crate::domain::activity_service::ActivityService;
use crate::domain::commands::fields::{
    AddZoneCommand, CreateFieldCommand, UpdateFieldCommand, UpdateZoneCommand,
};
use crate::domain::models::{Field, FieldValidationError, Zone};
use crate::domain::state::FieldsState;
use crate::storage::FieldsRepository;

#[derive(Clone)]
pub struct FieldService {
    state: Arc<Mutex<FieldsState>>,
    repository: FieldsRepository,
    activity: ActivityService,
}

impl FieldService {
    pub fn new(
        state: Arc<Mutex<FieldsState>>,
        repository: FieldsRepository,
        activity: ActivityService,
    ) -> Self {
        Self {
            state,
            repository,
            activity,
        }
    }

    pub fn create_field(&self, command: CreateFieldCommand) -> Result<Field> {
        if command.name.trim().is_empty() {
            return Err(FieldValidationError::EmptyName.into());
        }
        if command.area <= 0.0 {
            return Err(FieldValidationError::NonPositiveArea.into());
        }

        let now = Local::now().naive_local();
        let field = Field {
            id: Field::generate_id(),
            name: command.name.trim().to_string(),
            area: command.area,
            location: command.location,
            soil_type: command.soil_type,
            zones: Vec::new(),
            notes: command.notes,
            status: command.status,
            created_at: now,
            updated_at: now,
        };

        {
            let mut state = self.state.lock().unwrap();
            state.fields.push(field.clone());
            self.persist(&state);
        }

        info!("Created field {} ({})", field.name, field.id);
        self.activity.record(
            ActivityType::Field,
            ActivityAction::Create,
            format!("Created field \"{}\"", field.name),
            Some((EntityKind::Field, &field.id)),
        );
        Ok(field)
    }

    /// Merge the given fields over an existing field. Returns `false` when
    /// the id is unknown; the original treated that as silent success and
    /// callers still may.
    pub fn update_field(&self, id: &str, command: UpdateFieldCommand) -> Result<bool> {
        if let Some(ref name) = command.name {
            if name.trim().is_empty() {
                return Err(FieldValidationError::EmptyName.into());
            }
        }
        if let Some(area) = command.area {
            if area <= 0.0 {
                return Err(FieldValidationError::NonPositiveArea.into());
            }
        }

        let updated_name = {
            let mut state = self.state.lock().unwrap();
            let field = match state.fields.iter_mut().find(|f| f.id == id) {
                Some(f) => f,
                None => return Ok(false),
            };

            if let Some(name) = command.name {
                field.name = name.trim().to_string();
            }
            if let Some(area) = command.area {
                field.area = area;
            }
            if let Some(location) = command.location {
                field.location = Some(location);
            }
            if let Some(soil_type) = command.soil_type {
                field.soil_type = Some(soil_type);
            }
            if let Some(notes) = command.notes {
                field.notes = Some(notes);
            }
            if let Some(status) = command.status {
                field.status = status;
            }
            field.updated_at = Local::now().naive_local();
            let name = field.name.clone();
            self.persist(&state);
            name
        };

        self.activity.record(
            ActivityType::Field,
            ActivityAction::Update,
            format!("Updated field \"{}\"", updated_name),
            Some((EntityKind::Field, id)),
        );
        Ok(true)
    }

    /// Hard delete. Clears the selection pointer when it referenced the
    /// deleted field. Returns `false` when the id is unknown.
    pub fn delete_field(&self, id: &str) -> Result<bool> {
        let deleted_name = {
            let mut state = self.state.lock().unwrap();
            let Some(position) = state.fields.iter().position(|f| f.id == id) else {
                return Ok(false);
            };
            let removed = state.fields.remove(position);
            if state.selected_field_id.as_deref() == Some(id) {
                state.selected_field_id = None;
            }
            self.persist(&state);
            removed.name
        };

        info!("Deleted field {} ({})", deleted_name, id);
        self.activity.record(
            ActivityType::Field,
            ActivityAction::Delete,
            format!("Deleted field \"{}\"", deleted_name),
            Some((EntityKind::Field, id)),
        );
        Ok(true)
    }

    pub fn get_field(&self, id: &str) -> Option<Field> {
        let state = self.state.lock().unwrap();
        state.fields.iter().find(|f| f.id == id).cloned()
    }

    pub fn list_fields(&self) -> Vec<Field> {
        self.state.lock().unwrap().fields.clone()
    }

    pub fn field_count(&self) -> usize {
        self.state.lock().unwrap().fields.len()
    }

    pub fn field_exists(&self, id: &str) -> bool {
        let state = self.state.lock().unwrap();
        state.fields.iter().any(|f| f.id == id)
    }

    pub fn select_field(&self, id: Option<String>) {
        let mut state = self.state.lock().unwrap();
        state.selected_field_id = id;
        self.persist(&state);
    }

    pub fn selected_field_id(&self) -> Option<String> {
        self.state.lock().unwrap().selected_field_id.clone()
    }

    /// Add a zone to a field. Returns `None` when the field is unknown.
    pub fn add_zone(&self, field_id: &str, command: AddZoneCommand) -> Result<Option<Zone>> {
        if command.name.trim().is_empty() {
            return Err(FieldValidationError::EmptyZoneName.into());
        }
        if command.area <= 0.0 {
            return Err(FieldValidationError::NonPositiveZoneArea.into());
        }

        let now = Local::now().naive_local();
        let mut state = self.state.lock().unwrap();
        let field = match state.fields.iter_mut().find(|f| f.id == field_id) {
            Some(f) => f,
            None => return Ok(None),
        };

        let zone = Zone {
            id: Zone::generate_id(),
            field_id: field_id.to_string(),
            name: command.name.trim().to_string(),
            area: command.area,
            soil_type: command.soil_type,
            characteristics: command.characteristics,
            created_at: now,
        };
        field.zones.push(zone.clone());
        field.updated_at = now;
        self.persist(&state);
        Ok(Some(zone))
    }

    /// Returns `false` when the field or zone is unknown.
    pub fn update_zone(
        &self,
        field_id: &str,
        zone_id: &str,
        command: UpdateZoneCommand,
    ) -> Result<bool> {
        if let Some(ref name) = command.name {
            if name.trim().is_empty() {
                return Err(FieldValidationError::EmptyZoneName.into());
            }
        }
        if let Some(area) = command.area {
            if area <= 0.0 {
                return Err(FieldValidationError::NonPositiveZoneArea.into());
            }
        }

        let mut state = self.state.lock().unwrap();
        let field = match state.fields.iter_mut().find(|f| f.id == field_id) {
            Some(f) => f,
            None => return Ok(false),
        };
        let zone = match field.zones.iter_mut().find(|z| z.id == zone_id) {
            Some(z) => z,
            None => return Ok(false),
        };

        if let Some(name) = command.name {
            zone.name = name.trim().to_string();
        }
        if let Some(area) = command.area {
            zone.area = area;
        }
        if let Some(soil_type) = command.soil_type {
            zone.soil_type = Some(soil_type);
        }
        if let Some(characteristics) = command.characteristics {
            zone.characteristics = Some(characteristics);
        }
        field.updated_at = Local::now().naive_local();
        self.persist(&state);
        Ok(true)
    }

    /// Returns `false` when the field or zone is unknown.
    pub fn delete_zone(&self, field_id: &str, zone_id: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let field = match state.fields.iter_mut().find(|f| f.id == field_id) {
            Some(f) => f,
            None => return Ok(false),
        };
        let Some(position) = field.zones.iter().position(|z| z.id == zone_id) else {
            return Ok(false);
        };
        field.zones.remove(position);
        field.updated_at = Local::now().naive_local();
        self.persist(&state);
        Ok(true)
    }

    fn persist(&self, state: &FieldsState) {
        if let Err(e) = self.repository.save(state) {
            warn!("Failed to persist fields: {}", e);
        }
    }
}
