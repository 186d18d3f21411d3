//! User domain types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use vida_saborosa_core::{Email, UserId};

/// A registered account as stored in `users.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Login email; unique across records.
    pub email: Email,
    /// Display name.
    pub full_name: String,
    /// Public handle.
    pub username: String,
    /// Argon2id PHC string.
    #[serde(rename = "password")]
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Identity the cart and favorites stores are keyed by.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from(&self.email)
    }
}

/// Registration input.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub full_name: String,
    pub username: String,
    pub password: SecretString,
}
