//! # Storage Module
//!
//! Persistence boundary for the farm management core. The domain layer sees
//! an opaque key-value store of serialized blobs; the production
//! implementation keeps one JSON file per key.

pub mod json;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use json::{FieldsRepository, JsonBlobStore, PlantsRepository, UiStateRepository};
pub use traits::BlobStore;
