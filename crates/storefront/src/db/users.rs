//! User repository backed by `users.json`.
//!
//! The file is re-read on every call and rewritten whole (temp file + rename)
//! on every change. A missing file means no accounts exist yet.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use vida_saborosa_core::Email;

use super::RepositoryError;
use crate::models::user::UserRecord;
use crate::storage::write_atomic;

/// Repository for user account records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    path: PathBuf,
}

impl UserRepository {
    /// Create a repository over the records file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the records file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, in registration order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read.
    /// Returns `RepositoryError::DataCorruption` if the file is not a valid
    /// record list or contains an invalid email.
    pub fn list(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<UserRecord> = serde_json::from_str(&contents).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid users file: {e}"))
        })?;
        for record in &records {
            Email::parse(record.email.as_str()).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in users file: {e}"))
            })?;
        }
        Ok(records)
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the records cannot be read.
    pub fn get_by_email(&self, email: &Email) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|r| r.email == *email))
    }

    /// Store a new record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError` if the records cannot be read or written.
    #[instrument(skip(self, record), fields(email = %record.email))]
    pub fn create(&self, record: UserRecord) -> Result<UserRecord, RepositoryError> {
        let mut records = self.list()?;
        if records.iter().any(|r| r.email == record.email) {
            return Err(RepositoryError::Conflict(format!(
                "email {} already registered",
                record.email
            )));
        }
        records.push(record.clone());
        self.write_all(&records)?;
        debug!("user record created");
        Ok(record)
    }

    /// Replace the record with the same email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has that email.
    /// Returns `RepositoryError` if the records cannot be read or written.
    #[instrument(skip(self, record), fields(email = %record.email))]
    pub fn update(&self, record: UserRecord) -> Result<UserRecord, RepositoryError> {
        let mut records = self.list()?;
        let slot = records
            .iter_mut()
            .find(|r| r.email == record.email)
            .ok_or(RepositoryError::NotFound)?;
        *slot = record.clone();
        self.write_all(&records)?;
        debug!("user record updated");
        Ok(record)
    }

    fn write_all(&self, records: &[UserRecord]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(records)?;
        write_atomic(&self.path, json.as_bytes())?;
        Ok(())
    }
}
