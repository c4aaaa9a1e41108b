use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::PathBuf;

use crate::storage::traits::BlobStore;

/// Blob store backed by one `<key>.json` file per key.
///
/// Writes go through a temp file and a rename so a failed write never
/// leaves a truncated blob behind.
#[derive(Debug, Clone)]
pub struct JsonBlobStore {
    data_dir: PathBuf,
}

impl JsonBlobStore {
    /// Create a store rooted at `data_dir`, creating the directory if
    /// needed.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl BlobStore for JsonBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read blob {}", path.display()))?;
        Ok(Some(raw))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write blob {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace blob {}", path.display()))?;

        debug!("Persisted blob {} ({} bytes)", key, value.len());
        Ok(())
    }
}
