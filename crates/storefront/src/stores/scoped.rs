//! The user-switch protocol shared by the cart and favorites stores.
//!
//! A [`ScopedStore`] holds the in-memory value of exactly one namespace and
//! writes it through to storage after every change. Changing identity flushes
//! the outgoing namespace and loads the incoming one inside a single
//! `&mut self` call, so no store operation can observe a half-switched state.
//!
//! Storage failures never reach callers: unreadable slots load as empty
//! values and failed writes are logged and dropped. The next successful
//! write-through reconciles storage with memory.

use std::sync::Arc;

use tracing::{debug, error, trace, warn};

use vida_saborosa_core::UserId;

use super::namespace::resolve_key;
use super::persisted::{PersistedState, decode_state, decode_user, encode_state, encode_user};
use crate::storage::KeyValueStorage;

/// Lifecycle of a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Nothing loaded yet; in-memory state is a placeholder.
    Uninitialized,
    /// Memory mirrors the namespace of the given user (`None` = guest).
    Hydrated(Option<UserId>),
}

/// One namespaced, write-through value.
#[derive(Debug)]
pub struct ScopedStore<T: PersistedState> {
    storage: Arc<dyn KeyValueStorage>,
    value: T,
    activation: Activation,
}

impl<T: PersistedState> ScopedStore<T> {
    /// Create an uninitialized store over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            value: T::default(),
            activation: Activation::Uninitialized,
        }
    }

    /// Current in-memory value.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Whether memory has been populated from storage.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.activation, Activation::Hydrated(_))
    }

    /// User whose namespace is active (`None` for guest or uninitialized).
    #[must_use]
    pub fn active_user(&self) -> Option<&UserId> {
        match &self.activation {
            Activation::Hydrated(user) => user.as_ref(),
            Activation::Uninitialized => None,
        }
    }

    /// Reload the namespace that was active when the process last ran.
    ///
    /// Only an uninitialized store restores, and only when the pointer names
    /// a user; a guest pointer leaves the store for the next `switch_user`.
    pub fn restore(&mut self) {
        if self.is_ready() {
            return;
        }
        let Some(user) = self.read_pointer() else {
            trace!(store = %T::KIND, "no active user to restore");
            return;
        };
        self.value = self.load(Some(&user));
        debug!(store = %T::KIND, user = %user, "restored active namespace");
        self.activation = Activation::Hydrated(Some(user));
    }

    /// Make `user`'s namespace the active one.
    ///
    /// - Uninitialized: load the namespace.
    /// - Hydrated with the same user: nothing to do.
    /// - Hydrated with another user: flush current state, then load.
    pub fn switch_user(&mut self, user: Option<UserId>) {
        match &self.activation {
            Activation::Hydrated(current) if *current == user => {
                trace!(store = %T::KIND, "namespace already active");
                return;
            }
            Activation::Hydrated(current) => self.persist(current.as_ref()),
            Activation::Uninitialized => {}
        }

        self.value = self.load(user.as_ref());
        self.write_pointer(user.as_ref());
        debug!(
            store = %T::KIND,
            key = %resolve_key(T::KIND, user.as_ref()),
            "activated namespace"
        );
        self.activation = Activation::Hydrated(user);
    }

    /// Drop back to an uninitialized guest state.
    ///
    /// Clears memory and erases the guest slot so the next anonymous session
    /// starts empty. Other users' slots are untouched.
    pub fn reset(&mut self) {
        self.value = T::default();
        self.activation = Activation::Uninitialized;

        let key = T::KIND.guest_key();
        if let Err(e) = self.storage.remove(key) {
            error!(store = %T::KIND, key = %key, error = %e, "failed to erase guest slot");
        }
        self.write_pointer(None);
        debug!(store = %T::KIND, "store reset");
    }

    /// Apply a mutation and write the result through to storage.
    ///
    /// `apply` reports whether it changed anything; unchanged values are not
    /// rewritten. An uninitialized store activates the guest namespace first
    /// so the mutation lands on top of whatever the guest already saved.
    pub fn update(&mut self, apply: impl FnOnce(&mut T) -> bool) -> bool {
        if !self.is_ready() {
            self.switch_user(None);
        }
        let changed = apply(&mut self.value);
        if changed {
            self.persist(self.active_user());
        }
        changed
    }

    fn load(&self, user: Option<&UserId>) -> T {
        let key = resolve_key(T::KIND, user);
        match self.storage.get(&key) {
            Ok(Some(raw)) => decode_state(&raw).unwrap_or_else(|e| {
                warn!(store = %T::KIND, key = %key, error = %e, "unreadable slot, starting empty");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!(store = %T::KIND, key = %key, error = %e, "storage read failed, starting empty");
                T::default()
            }
        }
    }

    fn persist(&self, user: Option<&UserId>) {
        let key = resolve_key(T::KIND, user);
        let result = encode_state(&self.value)
            .map_err(crate::storage::StorageError::from)
            .and_then(|raw| self.storage.set(&key, &raw));
        if let Err(e) = result {
            error!(store = %T::KIND, key = %key, error = %e, "failed to persist namespace");
        }
    }

    fn read_pointer(&self) -> Option<UserId> {
        let key = T::KIND.pointer_key();
        match self.storage.get(key) {
            Ok(Some(raw)) => decode_user(&raw).unwrap_or_else(|e| {
                warn!(store = %T::KIND, key = %key, error = %e, "unreadable active-user pointer");
                None
            }),
            Ok(None) => None,
            Err(e) => {
                warn!(store = %T::KIND, key = %key, error = %e, "storage read failed");
                None
            }
        }
    }

    fn write_pointer(&self, user: Option<&UserId>) {
        let key = T::KIND.pointer_key();
        let result = encode_user(user)
            .map_err(crate::storage::StorageError::from)
            .and_then(|raw| self.storage.set(key, &raw));
        if let Err(e) = result {
            error!(store = %T::KIND, key = %key, error = %e, "failed to persist active-user pointer");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vida_saborosa_core::{Favorites, MenuItemId};

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn user(id: &str) -> UserId {
        UserId::parse(id).unwrap()
    }

    fn store(storage: &Arc<MemoryStorage>) -> ScopedStore<Favorites> {
        ScopedStore::new(Arc::clone(storage) as Arc<dyn KeyValueStorage>)
    }

    #[test]
    fn test_starts_uninitialized() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store(&storage);
        assert_eq!(&store.activation, &Activation::Uninitialized);
        assert!(!store.is_ready());
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_first_activation_loads_saved_state() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set("favorites-a@x.com", r#"{"state":{"favorites":{"2":true}}}"#)
            .unwrap();

        let mut store = store(&storage);
        store.switch_user(Some(user("a@x.com")));

        assert!(store.is_ready());
        assert!(store.value().is_favorited(MenuItemId::new(2)));
        assert_eq!(
            storage.get("active-favorites-user").unwrap().as_deref(),
            Some(r#"{"state":{"userId":"a@x.com"}}"#)
        );
    }

    #[test]
    fn test_same_user_is_noop() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&storage);
        store.switch_user(Some(user("a@x.com")));
        store.update(|f| {
            f.toggle(MenuItemId::new(1));
            true
        });

        // A foreign write that a reload would pick up.
        storage
            .set("favorites-a@x.com", r#"{"state":{"favorites":{}}}"#)
            .unwrap();
        store.switch_user(Some(user("a@x.com")));
        assert!(store.value().is_favorited(MenuItemId::new(1)));
    }

    #[test]
    fn test_switch_flushes_outgoing_namespace() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&storage);
        store.switch_user(Some(user("a@x.com")));
        store.update(|f| {
            f.toggle(MenuItemId::new(1));
            true
        });
        // Lose the write-through copy; the switch must flush memory again.
        storage.remove("favorites-a@x.com").unwrap();

        store.switch_user(Some(user("b@y.com")));
        assert!(store.value().is_empty());
        assert_eq!(
            storage.get("favorites-a@x.com").unwrap().as_deref(),
            Some(r#"{"state":{"favorites":{"1":true}}}"#)
        );
    }

    #[test]
    fn test_update_on_uninitialized_store_uses_guest_namespace() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set("favorites-guest", r#"{"state":{"favorites":{"4":true}}}"#)
            .unwrap();

        let mut store = store(&storage);
        store.update(|f| {
            f.toggle(MenuItemId::new(1));
            true
        });

        assert_eq!(&store.activation, &Activation::Hydrated(None));
        assert!(store.value().is_favorited(MenuItemId::new(4)));
        assert!(store.value().is_favorited(MenuItemId::new(1)));
    }

    #[test]
    fn test_unchanged_update_is_not_written() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&storage);
        store.switch_user(None);
        assert!(!store.update(|_| false));
        assert_eq!(storage.get("favorites-guest").unwrap(), None);
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("favorites-a@x.com", "{{{").unwrap();

        let mut store = store(&storage);
        store.switch_user(Some(user("a@x.com")));
        assert!(store.is_ready());
        assert!(store.value().is_empty());
    }

    #[test]
    fn test_restore_from_pointer() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut first = store(&storage);
            first.switch_user(Some(user("a@x.com")));
            first.update(|f| {
                f.toggle(MenuItemId::new(3));
                true
            });
        }

        let mut second = store(&storage);
        second.restore();
        assert_eq!(second.active_user(), Some(&user("a@x.com")));
        assert!(second.value().is_favorited(MenuItemId::new(3)));
    }

    #[test]
    fn test_restore_with_guest_pointer_stays_uninitialized() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set("active-favorites-user", r#"{"state":{"userId":null}}"#)
            .unwrap();

        let mut store = store(&storage);
        store.restore();
        assert!(!store.is_ready());
    }

    #[test]
    fn test_reset_erases_guest_slot_only() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&storage);
        store.switch_user(None);
        store.update(|f| f.toggle(MenuItemId::new(1)));
        store.switch_user(Some(user("a@x.com")));
        store.update(|f| f.toggle(MenuItemId::new(2)));

        store.reset();

        assert!(!store.is_ready());
        assert_eq!(store.active_user(), None);
        assert!(store.value().is_empty());
        assert_eq!(storage.get("favorites-guest").unwrap(), None);
        assert!(storage.get("favorites-a@x.com").unwrap().is_some());
        assert_eq!(
            storage.get("active-favorites-user").unwrap().as_deref(),
            Some(r#"{"state":{"userId":null}}"#)
        );
    }

    #[derive(Debug)]
    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn test_storage_failures_are_absorbed() {
        let mut store: ScopedStore<Favorites> = ScopedStore::new(Arc::new(FailingStorage));
        store.restore();
        store.switch_user(Some(user("a@x.com")));
        assert!(store.update(|f| f.toggle(MenuItemId::new(5))));
        assert!(store.value().is_favorited(MenuItemId::new(5)));
        store.reset();
        assert!(store.value().is_empty());
    }
}
