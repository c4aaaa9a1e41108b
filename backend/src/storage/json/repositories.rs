//! Typed repositories over the blob store.
//!
//! Each repository owns one blob key and handles (de)serialization of the
//! matching state struct. A missing or unparseable blob loads as default
//! state with a logged warning, so a damaged file never blocks a session.

use anyhow::Result;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::state::{FieldsState, PlantsState, UiState};
use crate::storage::traits::BlobStore;

/// Blob key for the fields collection.
pub const FIELDS_KEY: &str = "farm-plus-fields";
/// Blob key for plants, plant types and watering logs.
pub const PLANTS_KEY: &str = "farm-plus-plants";
/// Blob key for tasks, notes, activity log and UI prefs.
pub const UI_STATE_KEY: &str = "farm-plus-ui";

fn load_or_default<T: DeserializeOwned + Default>(store: &dyn BlobStore, key: &str) -> T {
    match store.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!("Blob {} is unparseable, starting from empty state: {}", key, e);
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            warn!("Failed to read blob {}, starting from empty state: {}", key, e);
            T::default()
        }
    }
}

fn save<T: Serialize>(store: &dyn BlobStore, key: &str, state: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(state)?;
    store.write(key, &raw)
}

/// Repository for the fields blob.
#[derive(Clone)]
pub struct FieldsRepository {
    store: Arc<dyn BlobStore>,
}

impl FieldsRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> FieldsState {
        load_or_default(&*self.store, FIELDS_KEY)
    }

    pub fn save(&self, state: &FieldsState) -> Result<()> {
        save(&*self.store, FIELDS_KEY, state)
    }
}

/// Repository for the plants blob.
#[derive(Clone)]
pub struct PlantsRepository {
    store: Arc<dyn BlobStore>,
}

impl PlantsRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> PlantsState {
        load_or_default(&*self.store, PLANTS_KEY)
    }

    pub fn save(&self, state: &PlantsState) -> Result<()> {
        save(&*self.store, PLANTS_KEY, state)
    }
}

/// Repository for the UI state blob.
#[derive(Clone)]
pub struct UiStateRepository {
    store: Arc<dyn BlobStore>,
}

impl UiStateRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> UiState {
        load_or_default(&*self.store, UI_STATE_KEY)
    }

    pub fn save(&self, state: &UiState) -> Result<()> {
        save(&*self.store, UI_STATE_KEY, state)
    }
}
