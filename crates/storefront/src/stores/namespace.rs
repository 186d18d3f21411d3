//! Persistence-key resolution.
//!
//! Each store kind owns a family of storage slots: one per user plus one for
//! the anonymous session, and a pointer slot remembering which user was last
//! active.

use vida_saborosa_core::UserId;

/// Which store a storage key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Cart,
    Favorites,
}

impl StoreKind {
    /// Key prefix and name of the field inside the persisted `state` object.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Favorites => "favorites",
        }
    }

    /// Slot remembering the last active user for this store.
    ///
    /// Lies outside the `"<kind>-"` prefix, so no user key can equal it.
    #[must_use]
    pub const fn pointer_key(&self) -> &'static str {
        match self {
            Self::Cart => "active-cart-user",
            Self::Favorites => "active-favorites-user",
        }
    }

    /// Slot holding the anonymous session's state.
    #[must_use]
    pub const fn guest_key(&self) -> &'static str {
        match self {
            Self::Cart => "cart-guest",
            Self::Favorites => "favorites-guest",
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage key for a user's (or the guest's) state.
///
/// `"cart-" + id` for users, `"cart-guest"` without one; likewise for
/// favorites. Since a [`UserId`] can never be `guest`, distinct identities
/// always map to distinct keys.
#[must_use]
pub fn resolve_key(kind: StoreKind, user: Option<&UserId>) -> String {
    user.map_or_else(
        || kind.guest_key().to_owned(),
        |id| format!("{}-{}", kind.as_str(), id.as_str()),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn user(id: &str) -> UserId {
        UserId::parse(id).unwrap()
    }

    #[test]
    fn test_guest_keys() {
        assert_eq!(resolve_key(StoreKind::Cart, None), "cart-guest");
        assert_eq!(resolve_key(StoreKind::Favorites, None), "favorites-guest");
    }

    #[test]
    fn test_user_keys() {
        assert_eq!(
            resolve_key(StoreKind::Cart, Some(&user("a@x.com"))),
            "cart-a@x.com"
        );
        assert_eq!(
            resolve_key(StoreKind::Favorites, Some(&user("b@y.com"))),
            "favorites-b@y.com"
        );
    }

    #[test]
    fn test_distinct_ids_never_collide() {
        let ids = ["a@x.com", "b@y.com", "A@x.com", "guest@x.com", "guests", "x"];
        let mut keys: HashSet<String> = ids
            .iter()
            .map(|id| resolve_key(StoreKind::Cart, Some(&user(id))))
            .collect();
        assert_eq!(keys.len(), ids.len());
        assert!(keys.insert(resolve_key(StoreKind::Cart, None)));
    }

    #[test]
    fn test_pointer_keys_are_outside_user_namespaces() {
        for kind in [StoreKind::Cart, StoreKind::Favorites] {
            assert!(!kind.pointer_key().starts_with(kind.as_str()));
        }
    }

    #[test]
    fn test_kinds_do_not_share_keys() {
        let id = user("a@x.com");
        assert_ne!(
            resolve_key(StoreKind::Cart, Some(&id)),
            resolve_key(StoreKind::Favorites, Some(&id))
        );
    }
}
