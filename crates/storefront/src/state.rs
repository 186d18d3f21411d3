//! The storefront session: storage, stores and auth wired together.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, instrument, warn};

use vida_saborosa_core::{Email, UserId};

use crate::config::StorefrontConfig;
use crate::db::UserRepository;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::models::user::{NewAccount, UserRecord};
use crate::services::auth::{AuthError, AuthService, MIN_PASSWORD_LENGTH};
use crate::services::session::SessionIdentity;
use crate::storage::{FileStorage, KeyValueStorage};
use crate::stores::{CartStore, FavoritesStore};

/// Everything one storefront user interaction needs.
///
/// Keeps the cart and favorites stores on the namespace of whoever the
/// session identity says is logged in.
#[derive(Debug)]
pub struct StorefrontSession {
    storage: Arc<dyn KeyValueStorage>,
    identity: SessionIdentity,
    auth: AuthService,
    cart: CartStore,
    favorites: FavoritesStore,
}

impl StorefrontSession {
    /// Open the file-backed session described by `config`.
    ///
    /// Nothing is read until [`restore`](Self::restore) is called.
    #[must_use]
    pub fn open(config: &StorefrontConfig) -> Self {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(config.storage_path()));
        let users = UserRepository::new(config.users_path());
        Self::from_parts(storage, AuthService::new(users, config.min_password_length))
    }

    /// Session over an explicit storage backend and account repository.
    #[must_use]
    pub fn with_storage(storage: Arc<dyn KeyValueStorage>, users: UserRepository) -> Self {
        Self::from_parts(storage, AuthService::new(users, MIN_PASSWORD_LENGTH))
    }

    fn from_parts(storage: Arc<dyn KeyValueStorage>, auth: AuthService) -> Self {
        Self {
            identity: SessionIdentity::new(Arc::clone(&storage)),
            cart: CartStore::new(Arc::clone(&storage)),
            favorites: FavoritesStore::new(Arc::clone(&storage)),
            storage,
            auth,
        }
    }

    /// Pick up where the previous process left off.
    ///
    /// Both stores reload their last active namespace, then follow the
    /// session identity. An unreadable identity counts as logged out.
    pub fn restore(&mut self) {
        self.cart.restore();
        self.favorites.restore();

        let current = self.identity.current_user_id().unwrap_or_else(|e| {
            warn!(error = %e, "session identity unreadable, continuing as guest");
            None
        });
        if let Some(user) = &current {
            set_sentry_user(user, Some(user.as_str()));
        }
        self.switch_stores(current);
    }

    /// Log in with email and password.
    ///
    /// Returns `Ok(false)` for a malformed email, unknown account or wrong
    /// password; the active namespace is left alone in that case.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the accounts or session slot cannot be
    /// read or written.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &SecretString) -> Result<bool> {
        let user = match self.auth.authenticate(email, password) {
            Ok(user) => user,
            Err(AuthError::InvalidEmail(_) | AuthError::InvalidCredentials) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let user_id = user.user_id();
        self.identity.establish(&user_id)?;
        set_sentry_user(&user_id, Some(user.email.as_str()));
        self.switch_stores(Some(user_id));
        info!("user logged in");
        Ok(true)
    }

    /// Log out: forget the identity and drop both stores back to guest.
    ///
    /// The guest cart and favorites are erased; the user's own namespaces
    /// stay in storage for the next login.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the session slot cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<()> {
        self.cart.reset();
        self.favorites.reset();
        self.identity.clear()?;
        clear_sentry_user();
        info!("user logged out");
        Ok(())
    }

    /// Create an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the input is invalid or the email is taken.
    pub fn register(&self, account: NewAccount) -> Result<UserRecord> {
        Ok(self.auth.register(account)?)
    }

    /// Who is logged in, per the session slot.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the session slot cannot be read.
    pub fn current_user_id(&self) -> Result<Option<UserId>> {
        Ok(self.identity.current_user_id()?)
    }

    /// Account record of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the session or accounts cannot be read.
    pub fn current_user(&self) -> Result<Option<UserRecord>> {
        let Some(user_id) = self.current_user_id()? else {
            return Ok(None);
        };
        let Ok(email) = Email::parse(user_id.as_str()) else {
            return Ok(None);
        };
        Ok(self.auth.find_user(&email)?)
    }

    /// Change the logged-in user's display name and username.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if nobody is logged in.
    /// Returns `AppError::Auth` if the fields are blank.
    pub fn update_profile(&self, full_name: &str, username: &str) -> Result<UserRecord> {
        let user = self.require_user()?;
        Ok(self.auth.update_profile(&user.email, full_name, username)?)
    }

    /// Change the logged-in user's password.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if nobody is logged in.
    /// Returns `AppError::Auth` if `current` is wrong or `new` is too weak.
    pub fn change_password(&self, current: &SecretString, new: &SecretString) -> Result<()> {
        let user = self.require_user()?;
        Ok(self.auth.change_password(&user.email, current, new)?)
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub const fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// The shared storage backend.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }

    fn require_user(&self) -> Result<UserRecord> {
        self.current_user()?
            .ok_or_else(|| AppError::Unauthorized("not logged in".to_string()))
    }

    fn switch_stores(&mut self, user: Option<UserId>) {
        self.cart.switch_user(user.clone());
        self.favorites.switch_user(user);
    }
}
