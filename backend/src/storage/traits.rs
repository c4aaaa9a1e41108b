//! # Storage Traits
//!
//! The core persists three independent keyed blobs and reads them back at
//! session start. This trait abstracts the backing store so the domain
//! layer never depends on where the blobs live.

use anyhow::Result;

/// An opaque synchronous key-value store of serialized blobs.
///
/// Keys are application-scoped identifiers; values are implementation
/// defined structured data produced by the repositories.
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write the blob for `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}
