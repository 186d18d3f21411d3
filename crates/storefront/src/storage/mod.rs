//! Local key-value storage.
//!
//! The stores persist into a flat string-to-string namespace modelled on a
//! browser's local storage. [`KeyValueStorage`] is the seam: the stores only
//! ever see this trait, so the backend can be swapped without touching any
//! cart or favorites logic.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - process-local map, for tests and throwaway sessions
//! - [`FileStorage`] - one JSON object file on disk

mod atomic;
mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

pub(crate) use atomic::write_atomic;

use thiserror::Error;

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A value or the backing file could not be encoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A previous writer panicked while holding the storage lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A synchronous string key-value store.
///
/// All methods take `&self`; implementations use interior mutability so a
/// single backend can be shared (via `Arc`) by every store in a session.
pub trait KeyValueStorage: Send + Sync + std::fmt::Debug {
    /// Read a value. Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Succeeds even if the key did not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
