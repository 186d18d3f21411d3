//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VIDA_DATA_DIR` - Directory holding `local-storage.json` and `users.json`
//!   (default: `.vida-saborosa`)
//! - `VIDA_MIN_PASSWORD_LENGTH` - Minimum account password length (default: 8,
//!   may only be raised)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::services::auth::MIN_PASSWORD_LENGTH;

const DEFAULT_DATA_DIR: &str = ".vida-saborosa";
const STORAGE_FILE: &str = "local-storage.json";
const USERS_FILE: &str = "users.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for all persisted state
    pub data_dir: PathBuf,
    /// Minimum password length enforced on registration and password change
    pub min_password_length: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            min_password_length: MIN_PASSWORD_LENGTH,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `VIDA_MIN_PASSWORD_LENGTH` is
    /// not an integer of at least 8.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("VIDA_DATA_DIR", DEFAULT_DATA_DIR));
        let min_password_length = parse_min_password_length(get_optional_env(
            "VIDA_MIN_PASSWORD_LENGTH",
        ))?;

        Ok(Self {
            data_dir,
            min_password_length,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration rooted at `data_dir` with default settings otherwise.
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Path of the key-value storage file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }

    /// Path of the user records file.
    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    /// Directory for all persisted state.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_min_password_length(raw: Option<String>) -> Result<usize, ConfigError> {
    let Some(raw) = raw else {
        return Ok(MIN_PASSWORD_LENGTH);
    };
    let invalid = |msg: String| ConfigError::InvalidEnvVar("VIDA_MIN_PASSWORD_LENGTH".to_string(), msg);
    let length = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid(e.to_string()))?;
    if length < MIN_PASSWORD_LENGTH {
        return Err(invalid(format!(
            "must be at least {MIN_PASSWORD_LENGTH} (got {length})"
        )));
    }
    Ok(length)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = StorefrontConfig::default();
        assert_eq!(
            config.storage_path(),
            Path::new(".vida-saborosa").join("local-storage.json")
        );
        assert_eq!(
            config.users_path(),
            Path::new(".vida-saborosa").join("users.json")
        );
        assert_eq!(config.min_password_length, 8);
    }

    #[test]
    fn test_with_data_dir() {
        let config = StorefrontConfig::with_data_dir("/tmp/vs");
        assert_eq!(config.users_path(), Path::new("/tmp/vs/users.json"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_min_password_length_default() {
        assert_eq!(parse_min_password_length(None).unwrap(), 8);
    }

    #[test]
    fn test_min_password_length_raised() {
        assert_eq!(parse_min_password_length(Some(" 12 ".to_string())).unwrap(), 12);
    }

    #[test]
    fn test_min_password_length_too_low() {
        let err = parse_min_password_length(Some("4".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "VIDA_MIN_PASSWORD_LENGTH"));
    }

    #[test]
    fn test_min_password_length_not_a_number() {
        assert!(parse_min_password_length(Some("eight".to_string())).is_err());
    }
}
