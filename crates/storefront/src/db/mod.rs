//! Flat-file persistence for storefront accounts.
//!
//! # Files
//!
//! - `users.json` - JSON array of [`UserRecord`](crate::models::UserRecord)s
//!
//! Cart, favorites and session slots live in the key-value storage instead;
//! see [`crate::storage`].

pub mod users;

pub use users::UserRepository;

use thiserror::Error;

/// Errors that can occur in repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Filesystem operation failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Records could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}
