//! The durable login slot.
//!
//! Records which account is logged in so the next process can pick the
//! session up again. Stored under [`keys::AUTH_SESSION`] in the same
//! key-value storage as the carts.

use std::sync::Arc;

use tracing::warn;

use vida_saborosa_core::UserId;

use super::auth::AuthError;
use crate::models::session::keys;
use crate::storage::KeyValueStorage;
use crate::stores::{decode_user, encode_user};

/// Handle on the persisted session identity.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionIdentity {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// The logged-in user, if any. An unreadable slot counts as logged out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the storage backend fails.
    pub fn current_user_id(&self) -> Result<Option<UserId>, AuthError> {
        let Some(raw) = self.storage.get(keys::AUTH_SESSION)? else {
            return Ok(None);
        };
        Ok(decode_user(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "unreadable session slot, treating as logged out");
            None
        }))
    }

    /// Record `user` as logged in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the slot cannot be written.
    pub fn establish(&self, user: &UserId) -> Result<(), AuthError> {
        let raw = encode_user(Some(user)).map_err(crate::storage::StorageError::from)?;
        self.storage.set(keys::AUTH_SESSION, &raw)?;
        Ok(())
    }

    /// Forget the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the slot cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.storage.remove(keys::AUTH_SESSION)?;
        Ok(())
    }
}
