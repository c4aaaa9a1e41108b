//! Plant management: CRUD, the plant type catalog, watering and the
//! recompute sweep that keeps derived watering statuses honest.
//!
//! `water_plant` is the only path that both mutates watering fields and
//! appends to the watering log. Generic updates that touch clock-relevant
//! fields recompute the affected plant's status in place, and a full sweep
//! runs at session initialization.

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use log::{info, warn};
use shared::{ActivityAction, ActivityType, EntityKind, PlantFilters, WateringStatus};
use std::sync::{Arc, Mutex};

use crate::domain::activity_service::ActivityService;
use crate::domain::commands::plants::{
    AddPlantTypeCommand, CreatePlantCommand, UpdatePlantCommand, WaterPlantCommand,
};
use crate::domain::field_service::FieldService;
use crate::domain::models::{Plant, PlantNotFound, PlantType, PlantValidationError, WateringLog};
use crate::domain::state::PlantsState;
use crate::domain::watering;
use crate::storage::PlantsRepository;

#[derive(Clone)]
pub struct PlantService {
    state: Arc<Mutex<PlantsState>>,
    repository: PlantsRepository,
    field_service: FieldService,
    activity: ActivityService,
}

impl PlantService {
    pub fn new(
        state: Arc<Mutex<PlantsState>>,
        repository: PlantsRepository,
        field_service: FieldService,
        activity: ActivityService,
    ) -> Self {
        Self {
            state,
            repository,
            field_service,
            activity,
        }
    }

    pub fn create_plant(&self, command: CreatePlantCommand) -> Result<Plant> {
        if command.name.trim().is_empty() {
            return Err(PlantValidationError::EmptyName.into());
        }
        if command.quantity < 1 {
            return Err(PlantValidationError::ZeroQuantity.into());
        }
        if command.watering_frequency_days == Some(0) {
            return Err(PlantValidationError::ZeroFrequency.into());
        }
        if !self.field_service.field_exists(&command.field_id) {
            return Err(PlantValidationError::UnknownField(command.field_id).into());
        }

        let now = Local::now().naive_local();
        let plant = {
            let mut state = self.state.lock().unwrap();
            let plant_type = state
                .plant_types
                .iter()
                .find(|t| t.id == command.type_id)
                .cloned()
                .ok_or(PlantValidationError::UnknownPlantType(command.type_id.clone()))?;

            let frequency = command
                .watering_frequency_days
                .unwrap_or(plant_type.watering_frequency_days);
            let plant = Plant {
                id: Plant::generate_id(),
                name: command.name.trim().to_string(),
                type_id: command.type_id,
                plant_type,
                field_id: command.field_id,
                zone_id: command.zone_id,
                variety: command.variety,
                quantity: command.quantity,
                planted_at: command.planted_at,
                watering_frequency_days: frequency,
                last_watered_at: None,
                next_watering_at: None,
                // Never watered yet, so the derivation starts it urgent.
                watering_status: watering::derive_watering_status(None, None, frequency, now.date()),
                health_status: command.health_status,
                notes: command.notes,
                created_at: now,
                updated_at: now,
            };
            state.plants.push(plant.clone());
            self.persist(&state);
            plant
        };

        info!("Planted {} x {} ({})", plant.quantity, plant.name, plant.id);
        self.activity.record(
            ActivityType::Planting,
            ActivityAction::Create,
            format!("Planted {} x {}", plant.quantity, plant.name),
            Some((EntityKind::Plant, &plant.id)),
        );
        Ok(plant)
    }

    /// Merge the given fields over an existing plant. When a clock-relevant
    /// field changed (frequency, last/next watering) the derived status is
    /// recomputed in the same operation. Returns `false` when the id is
    /// unknown.
    pub fn update_plant(&self, id: &str, command: UpdatePlantCommand) -> Result<bool> {
        if let Some(ref name) = command.name {
            if name.trim().is_empty() {
                return Err(PlantValidationError::EmptyName.into());
            }
        }
        if command.quantity == Some(0) {
            return Err(PlantValidationError::ZeroQuantity.into());
        }
        if command.watering_frequency_days == Some(0) {
            return Err(PlantValidationError::ZeroFrequency.into());
        }
        if let Some(ref field_id) = command.field_id {
            if !self.field_service.field_exists(field_id) {
                return Err(PlantValidationError::UnknownField(field_id.clone()).into());
            }
        }

        let now = Local::now().naive_local();
        let updated_name = {
            let mut state = self.state.lock().unwrap();
            let plant = match state.plants.iter_mut().find(|p| p.id == id) {
                Some(p) => p,
                None => return Ok(false),
            };

            let watering_touched = command.watering_frequency_days.is_some()
                || command.last_watered_at.is_some()
                || command.next_watering_at.is_some();

            if let Some(name) = command.name {
                plant.name = name.trim().to_string();
            }
            if let Some(field_id) = command.field_id {
                plant.field_id = field_id;
            }
            if let Some(zone_id) = command.zone_id {
                plant.zone_id = Some(zone_id);
            }
            if let Some(variety) = command.variety {
                plant.variety = Some(variety);
            }
            if let Some(quantity) = command.quantity {
                plant.quantity = quantity;
            }
            if let Some(frequency) = command.watering_frequency_days {
                plant.watering_frequency_days = frequency;
            }
            if let Some(last_watered_at) = command.last_watered_at {
                plant.last_watered_at = Some(last_watered_at);
            }
            if let Some(next_watering_at) = command.next_watering_at {
                plant.next_watering_at = Some(next_watering_at);
            }
            if let Some(health_status) = command.health_status {
                plant.health_status = health_status;
            }
            if let Some(notes) = command.notes {
                plant.notes = Some(notes);
            }
            if watering_touched {
                plant.watering_status = watering::derive_for_plant(plant, now.date());
            }
            plant.updated_at = now;
            let name = plant.name.clone();
            self.persist(&state);
            name
        };

        self.activity.record(
            ActivityType::Plant,
            ActivityAction::Update,
            format!("Updated plant \"{}\"", updated_name),
            Some((EntityKind::Plant, id)),
        );
        Ok(true)
    }

    /// Hard delete. Cascades to the plant's watering logs and clears the
    /// selection pointer when it referenced the deleted plant. Returns
    /// `false` when the id is unknown.
    pub fn delete_plant(&self, id: &str) -> Result<bool> {
        let deleted_name = {
            let mut state = self.state.lock().unwrap();
            let Some(position) = state.plants.iter().position(|p| p.id == id) else {
                return Ok(false);
            };
            let removed = state.plants.remove(position);
            state.watering_logs.retain(|log| log.plant_id != id);
            if state.selected_plant_id.as_deref() == Some(id) {
                state.selected_plant_id = None;
            }
            self.persist(&state);
            removed.name
        };

        info!("Deleted plant {} ({})", deleted_name, id);
        self.activity.record(
            ActivityType::Plant,
            ActivityAction::Delete,
            format!("Deleted plant \"{}\"", deleted_name),
            Some((EntityKind::Plant, id)),
        );
        Ok(true)
    }

    /// Water a plant now: stamps the watering fields, forces the status to
    /// `Watered` and appends a watering log entry with the same timestamp.
    pub fn water_plant(&self, id: &str, command: WaterPlantCommand) -> Result<WateringLog> {
        self.water_plant_at(id, command, Local::now().naive_local())
    }

    /// `water_plant` with an explicit "now", sampled once for every value
    /// derived in this operation.
    pub fn water_plant_at(
        &self,
        id: &str,
        command: WaterPlantCommand,
        now: NaiveDateTime,
    ) -> Result<WateringLog> {
        if matches!(command.amount_liters, Some(amount) if amount < 0.0) {
            return Err(PlantValidationError::NegativeAmount.into());
        }

        let (log, plant_name) = {
            let mut state = self.state.lock().unwrap();
            let plant = state
                .plants
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(PlantNotFound { id: id.to_string() })?;

            plant.last_watered_at = Some(now);
            plant.next_watering_at =
                Some(now + Duration::days(i64::from(plant.watering_frequency_days)));
            // Watering always yields Watered, bypassing the derivation.
            plant.watering_status = WateringStatus::Watered;
            plant.updated_at = now;
            let plant_name = plant.name.clone();

            let log = WateringLog {
                id: WateringLog::generate_id(),
                plant_id: id.to_string(),
                date: now,
                amount_liters: command.amount_liters,
                notes: command.notes,
                created_at: now,
            };
            state.watering_logs.push(log.clone());
            self.persist(&state);
            (log, plant_name)
        };

        self.activity.record(
            ActivityType::Watering,
            ActivityAction::Create,
            format!("Watered \"{}\"", plant_name),
            Some((EntityKind::Plant, id)),
        );
        Ok(log)
    }

    /// Reassign every plant's derived watering status from current inputs.
    /// Returns how many plants changed bucket.
    pub fn recompute_all(&self, today: NaiveDate) -> usize {
        let mut state = self.state.lock().unwrap();
        let mut changed = 0;
        for plant in state.plants.iter_mut() {
            let status = watering::derive_for_plant(plant, today);
            if plant.watering_status != status {
                plant.watering_status = status;
                changed += 1;
            }
        }
        if changed > 0 {
            self.persist(&state);
            info!("Watering sweep reclassified {} plants", changed);
        }
        changed
    }

    pub fn add_plant_type(&self, command: AddPlantTypeCommand) -> Result<PlantType> {
        if command.name.trim().is_empty() {
            return Err(PlantValidationError::EmptyName.into());
        }
        if command.watering_frequency_days < 1 {
            return Err(PlantValidationError::ZeroFrequency.into());
        }

        let plant_type = PlantType {
            id: PlantType::generate_id(),
            name: command.name.trim().to_string(),
            category: command.category,
            watering_frequency_days: command.watering_frequency_days,
            growth_duration_days: command.growth_duration_days,
            common_pests: command.common_pests,
            care_instructions: command.care_instructions,
        };

        let mut state = self.state.lock().unwrap();
        state.plant_types.push(plant_type.clone());
        self.persist(&state);
        Ok(plant_type)
    }

    pub fn list_plant_types(&self) -> Vec<PlantType> {
        self.state.lock().unwrap().plant_types.clone()
    }

    pub fn get_plant(&self, id: &str) -> Option<Plant> {
        let state = self.state.lock().unwrap();
        state.plants.iter().find(|p| p.id == id).cloned()
    }

    pub fn list_plants(&self) -> Vec<Plant> {
        self.state.lock().unwrap().plants.clone()
    }

    pub fn list_plants_filtered(&self, filters: &PlantFilters) -> Vec<Plant> {
        let state = self.state.lock().unwrap();
        state
            .plants
            .iter()
            .filter(|p| Self::matches(p, filters))
            .cloned()
            .collect()
    }

    pub fn plants_by_field(&self, field_id: &str) -> Vec<Plant> {
        let state = self.state.lock().unwrap();
        state
            .plants
            .iter()
            .filter(|p| p.field_id == field_id)
            .cloned()
            .collect()
    }

    pub fn field_plant_count(&self, field_id: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.plants.iter().filter(|p| p.field_id == field_id).count()
    }

    /// Watering history for one plant, in insertion order.
    pub fn watering_logs_for(&self, plant_id: &str) -> Vec<WateringLog> {
        let state = self.state.lock().unwrap();
        state
            .watering_logs
            .iter()
            .filter(|log| log.plant_id == plant_id)
            .cloned()
            .collect()
    }

    pub fn select_plant(&self, id: Option<String>) {
        let mut state = self.state.lock().unwrap();
        state.selected_plant_id = id;
        self.persist(&state);
    }

    pub fn selected_plant_id(&self) -> Option<String> {
        self.state.lock().unwrap().selected_plant_id.clone()
    }

    fn matches(plant: &Plant, filters: &PlantFilters) -> bool {
        if let Some(ref field_id) = filters.field_id {
            if &plant.field_id != field_id {
                return false;
            }
        }
        if let Some(ref zone_id) = filters.zone_id {
            if plant.zone_id.as_ref() != Some(zone_id) {
                return false;
            }
        }
        if let Some(ref type_id) = filters.type_id {
            if &plant.type_id != type_id {
                return false;
            }
        }
        if let Some(health) = filters.health_status {
            if plant.health_status != health {
                return false;
            }
        }
        if let Some(status) = filters.watering_status {
            if plant.watering_status != status {
                return false;
            }
        }
        if let Some(ref query) = filters.search_query {
            let query = query.to_lowercase();
            let name_hit = plant.name.to_lowercase().contains(&query);
            let variety_hit = plant
                .variety
                .as_ref()
                .map(|v| v.to_lowercase().contains(&query))
                .unwrap_or(false);
            if !name_hit && !variety_hit {
                return false;
            }
        }
        true
    }

    fn persist(&self, state: &PlantsState) {
        if let Err(e) = self.repository.save(state) {
            warn!("Failed to persist plants: {}", e);
        }
    }
}
