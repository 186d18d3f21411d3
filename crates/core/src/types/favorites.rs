//! Favorited menu items.
//!
//! Stored as a map of item id to flag. Un-favoriting writes `false` rather
//! than removing the entry, so stored maps may contain tombstones; they are
//! never reported as favorites.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::MenuItemId;

/// Favorite flags for one user namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: BTreeMap<MenuItemId, bool>,
}

impl Favorites {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Flip an item's favorite flag and return the new value.
    pub fn toggle(&mut self, id: MenuItemId) -> bool {
        let flag = self.entries.entry(id).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Whether an item is currently favorited.
    #[must_use]
    pub fn is_favorited(&self, id: MenuItemId) -> bool {
        self.entries.get(&id).copied().unwrap_or(false)
    }

    /// Favorited ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = MenuItemId> + '_ {
        self.entries
            .iter()
            .filter_map(|(id, flag)| flag.then_some(*id))
    }

    /// Number of favorited items (tombstones excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids().count()
    }

    /// Whether no item is favorited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids().next().is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle(MenuItemId::new(3)));
        assert!(favorites.is_favorited(MenuItemId::new(3)));

        assert!(!favorites.toggle(MenuItemId::new(3)));
        assert!(!favorites.is_favorited(MenuItemId::new(3)));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_tombstones_are_kept_but_hidden() {
        let mut favorites = Favorites::new();
        favorites.toggle(MenuItemId::new(3));
        favorites.toggle(MenuItemId::new(3));
        favorites.toggle(MenuItemId::new(1));

        let json = serde_json::to_string(&favorites).unwrap();
        assert_eq!(json, r#"{"1":true,"3":false}"#);
        assert_eq!(favorites.ids().collect::<Vec<_>>(), vec![MenuItemId::new(1)]);
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_deserialize_stored_map() {
        let favorites: Favorites = serde_json::from_str(r#"{"4":true,"2":false}"#).unwrap();
        assert!(favorites.is_favorited(MenuItemId::new(4)));
        assert!(!favorites.is_favorited(MenuItemId::new(2)));
        assert!(!favorites.is_favorited(MenuItemId::new(99)));
    }
}
