//! Authentication service.
//!
//! Password accounts stored in the flat-file [`UserRepository`], hashed with
//! Argon2id.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use vida_saborosa_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::{NewAccount, UserRecord};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles registration, password login and account settings.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserRepository,
    min_password_length: usize,
}

impl AuthService {
    /// Create a new authentication service.
    ///
    /// `min_password_length` below [`MIN_PASSWORD_LENGTH`] is raised to it.
    #[must_use]
    pub fn new(users: UserRepository, min_password_length: usize) -> Self {
        Self {
            users,
            min_password_length: min_password_length.max(MIN_PASSWORD_LENGTH),
        }
    }

    /// Underlying account records.
    #[must_use]
    pub const fn users(&self) -> &UserRepository {
        &self.users
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidProfile` if the name or username is blank.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip(self, account), fields(email = %account.email))]
    pub fn register(&self, account: NewAccount) -> Result<UserRecord, AuthError> {
        let email = Email::parse(&account.email)?;
        let full_name = required_field("full name", &account.full_name)?;
        let username = required_field("username", &account.username)?;
        validate_password(account.password.expose_secret(), self.min_password_length)?;

        let password_hash = hash_password(account.password.expose_secret())?;

        let record = self
            .users
            .create(UserRecord {
                email,
                full_name,
                username,
                password_hash,
                created_at: Utc::now(),
            })
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        debug!("account registered");
        Ok(record)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::Repository` if the records cannot be read.
    pub fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<UserRecord, AuthError> {
        let email = Email::parse(email)?;
        let user = self
            .users
            .get_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password.expose_secret(), &user.password_hash)?;

        Ok(user)
    }

    /// Check a login attempt.
    ///
    /// A malformed email, unknown account or wrong password is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` only if the records cannot be read.
    pub fn verify_credentials(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<bool, AuthError> {
        match self.authenticate(email, password) {
            Ok(_) => Ok(true),
            Err(AuthError::InvalidEmail(_) | AuthError::InvalidCredentials) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Look up an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the records cannot be read.
    pub fn find_user(&self, email: &Email) -> Result<Option<UserRecord>, AuthError> {
        Ok(self.users.get_by_email(email)?)
    }

    // =========================================================================
    // Account Settings
    // =========================================================================

    /// Change the display name and username of an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidProfile` if either field is blank.
    /// Returns `AuthError::UserNotFound` if the account does not exist.
    #[instrument(skip(self, full_name, username), fields(email = %email))]
    pub fn update_profile(
        &self,
        email: &Email,
        full_name: &str,
        username: &str,
    ) -> Result<UserRecord, AuthError> {
        let full_name = required_field("full name", full_name)?;
        let username = required_field("username", username)?;

        let mut user = self
            .users
            .get_by_email(email)?
            .ok_or(AuthError::UserNotFound)?;
        user.full_name = full_name;
        user.username = username;

        let user = self.users.update(user).map_err(not_found_as_user)?;
        debug!("profile updated");
        Ok(user)
    }

    /// Replace an account's password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account does not exist.
    /// Returns `AuthError::InvalidCredentials` if `current` is wrong.
    /// Returns `AuthError::WeakPassword` if `new` doesn't meet requirements.
    #[instrument(skip(self, current, new), fields(email = %email))]
    pub fn change_password(
        &self,
        email: &Email,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), AuthError> {
        let mut user = self
            .users
            .get_by_email(email)?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(current.expose_secret(), &user.password_hash)?;
        validate_password(new.expose_secret(), self.min_password_length)?;

        user.password_hash = hash_password(new.expose_secret())?;
        self.users.update(user).map_err(not_found_as_user)?;
        debug!("password changed");
        Ok(())
    }
}

fn not_found_as_user(e: RepositoryError) -> AuthError {
    match e {
        RepositoryError::NotFound => AuthError::UserNotFound,
        other => AuthError::Repository(other),
    }
}

fn required_field(name: &str, value: &str) -> Result<String, AuthError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AuthError::InvalidProfile(format!("{name} must not be empty")));
    }
    Ok(value.to_string())
}

/// Validate password meets requirements.
fn validate_password(password: &str, min_length: usize) -> Result<(), AuthError> {
    if password.chars().count() < min_length {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {min_length} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> (tempfile::TempDir, AuthService) {
        let dir = tempfile::tempdir().unwrap();
        let users = UserRepository::new(dir.path().join("users.json"));
        (dir, AuthService::new(users, MIN_PASSWORD_LENGTH))
    }

    fn account(email: &str, password: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            full_name: "Ana Souza".to_string(),
            username: "ana".to_string(),
            password: SecretString::from(password),
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s)
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong horse", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("1234567", 8).is_err());
        assert!(validate_password("12345678", 8).is_ok());
        assert!(validate_password("12345678", 10).is_err());
    }

    #[test]
    fn test_min_length_never_below_default() {
        let dir = tempfile::tempdir().unwrap();
        let service = AuthService::new(UserRepository::new(dir.path().join("u.json")), 4);
        let err = service.register(account("a@x.com", "short12")).unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[test]
    fn test_register_and_verify() {
        let (_dir, service) = service();
        let user = service.register(account("a@x.com", "senha-forte")).unwrap();
        assert_eq!(user.email.as_str(), "a@x.com");
        assert_ne!(user.password_hash, "senha-forte");

        assert!(service.verify_credentials("a@x.com", &secret("senha-forte")).unwrap());
        assert!(!service.verify_credentials("a@x.com", &secret("senha-fraca")).unwrap());
        assert!(!service.verify_credentials("b@y.com", &secret("senha-forte")).unwrap());
        assert!(!service.verify_credentials("not-an-email", &secret("x")).unwrap());
    }

    #[test]
    fn test_register_duplicate() {
        let (_dir, service) = service();
        service.register(account("a@x.com", "senha-forte")).unwrap();
        let err = service.register(account("a@x.com", "outra-senha")).unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[test]
    fn test_register_rejects_bad_input() {
        let (_dir, service) = service();
        assert!(matches!(
            service.register(account("nope", "senha-forte")),
            Err(AuthError::InvalidEmail(_))
        ));

        let mut blank_name = account("a@x.com", "senha-forte");
        blank_name.full_name = "  ".to_string();
        assert!(matches!(
            service.register(blank_name),
            Err(AuthError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_update_profile() {
        let (_dir, service) = service();
        service.register(account("a@x.com", "senha-forte")).unwrap();
        let email = Email::parse("a@x.com").unwrap();

        let user = service.update_profile(&email, "Ana Lima", "analima").unwrap();
        assert_eq!(user.full_name, "Ana Lima");
        assert_eq!(user.username, "analima");

        let missing = Email::parse("b@y.com").unwrap();
        assert!(matches!(
            service.update_profile(&missing, "B", "b"),
            Err(AuthError::UserNotFound)
        ));
    }

    #[test]
    fn test_change_password() {
        let (_dir, service) = service();
        service.register(account("a@x.com", "senha-forte")).unwrap();
        let email = Email::parse("a@x.com").unwrap();

        assert!(matches!(
            service.change_password(&email, &secret("errada-123"), &secret("nova-senha")),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.change_password(&email, &secret("senha-forte"), &secret("curta")),
            Err(AuthError::WeakPassword(_))
        ));

        service
            .change_password(&email, &secret("senha-forte"), &secret("nova-senha"))
            .unwrap();
        assert!(service.verify_credentials("a@x.com", &secret("nova-senha")).unwrap());
        assert!(!service.verify_credentials("a@x.com", &secret("senha-forte")).unwrap());
    }
}
