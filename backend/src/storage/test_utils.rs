//! Test doubles for the storage boundary.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::storage::traits::BlobStore;

/// In-memory blob store for service tests.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    /// Raw blob contents, for asserting on what was persisted.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs.lock().unwrap().get(key).cloned()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.blobs
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Blob store whose writes always fail, for exercising the best-effort
/// persistence policy.
#[derive(Default)]
pub struct FailingBlobStore;

impl BlobStore for FailingBlobStore {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn write(&self, key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("write refused for blob {}", key))
    }
}
