//! # JSON Storage Module
//!
//! File-based implementation of the persistence boundary: one JSON file per
//! blob key under a data directory, with atomic temp-file writes.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── farm-plus-fields.json   ← fields collection
//! ├── farm-plus-plants.json   ← plants, plant types, watering logs
//! └── farm-plus-ui.json       ← tasks, notes, activity log, prefs
//! ```

pub mod blob_store;
pub mod repositories;

pub use blob_store::JsonBlobStore;
pub use repositories::{FieldsRepository, PlantsRepository, UiStateRepository};
