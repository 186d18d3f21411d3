//! Favorites store.

use std::sync::Arc;

use tracing::debug;

use vida_saborosa_core::{Favorites, MenuItemId, UserId};

use super::scoped::ScopedStore;
use crate::error::add_breadcrumb;
use crate::storage::KeyValueStorage;

/// The active user's favorited menu items.
#[derive(Debug)]
pub struct FavoritesStore {
    inner: ScopedStore<Favorites>,
}

impl FavoritesStore {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            inner: ScopedStore::new(storage),
        }
    }

    /// Flip an item's favorite flag and persist. Returns the new flag.
    pub fn toggle(&mut self, id: MenuItemId) -> bool {
        let mut favorited = false;
        self.inner.update(|favorites| {
            favorited = favorites.toggle(id);
            true
        });
        debug!(item_id = %id, favorited, "favorite toggled");
        add_breadcrumb(
            "favorites",
            if favorited { "Favorited item" } else { "Unfavorited item" },
            Some(&[("item_id", id.to_string().as_str())]),
        );
        favorited
    }

    #[must_use]
    pub fn is_favorited(&self, id: MenuItemId) -> bool {
        self.inner.value().is_favorited(id)
    }

    /// Favorited ids in ascending order.
    #[must_use]
    pub fn favorited_ids(&self) -> Vec<MenuItemId> {
        self.inner.value().ids().collect()
    }

    pub fn switch_user(&mut self, user: Option<UserId>) {
        self.inner.switch_user(user);
    }

    pub fn restore(&mut self) {
        self.inner.restore();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[must_use]
    pub fn active_user(&self) -> Option<&UserId> {
        self.inner.active_user()
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }
}
