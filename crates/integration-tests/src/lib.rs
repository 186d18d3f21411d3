//! Integration tests for Vida Saborosa.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vida-saborosa-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart behaviour through a full session
//! - `storefront_favorites` - Favorites behaviour through a full session
//! - `storefront_session` - Login/logout namespace switching across processes
//!
//! Every test runs against file-backed storage in a fresh temporary
//! directory, the same backend the `vs-cli` binary uses.

use std::path::Path;

use secrecy::SecretString;
use tempfile::TempDir;

use vida_saborosa_core::{CartCandidate, MenuItemId};
use vida_saborosa_storefront::StorefrontSession;
use vida_saborosa_storefront::catalog;
use vida_saborosa_storefront::config::StorefrontConfig;
use vida_saborosa_storefront::models::NewAccount;

/// Password used for every account created by [`TestContext::register`].
pub const PASSWORD: &str = "senha-forte";

/// A throwaway data directory.
#[derive(Debug)]
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Data directory shared by every session opened from this context.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig::with_data_dir(self.data_dir())
    }

    /// Open and restore a session, as a new process would.
    #[must_use]
    pub fn session(&self) -> StorefrontSession {
        let mut session = StorefrontSession::open(&self.config());
        session.restore();
        session
    }

    /// Register an account with [`PASSWORD`].
    ///
    /// # Panics
    ///
    /// Panics if registration fails.
    pub fn register(&self, email: &str) {
        self.session()
            .register(NewAccount {
                email: email.to_string(),
                full_name: "Cliente Teste".to_string(),
                username: email.split('@').next().unwrap_or(email).to_string(),
                password: SecretString::from(PASSWORD),
            })
            .expect("failed to register account");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Log `session` in as `email` with [`PASSWORD`].
///
/// # Panics
///
/// Panics if the login is rejected.
pub fn login(session: &mut StorefrontSession, email: &str) {
    let ok = session
        .login(email, &SecretString::from(PASSWORD))
        .expect("login failed");
    assert!(ok, "credentials rejected for {email}");
}

/// Cart candidate for a catalog item.
///
/// # Panics
///
/// Panics if the id is not on the menu.
#[must_use]
pub fn candidate(id: i32) -> CartCandidate {
    catalog::menu_item(MenuItemId::new(id))
        .expect("unknown menu item")
        .to_candidate()
        .expect("invalid menu item")
}
