//! Per-user, write-through state stores.
//!
//! # Stores
//!
//! - `cart` - Ordered line items of the active user
//! - `favorites` - Favorited menu items of the active user
//!
//! Both share the namespace switch protocol in `ScopedStore`: one namespace
//! (`cart-<user>` / `cart-guest`, and likewise for favorites) is active at a
//! time, and changing user flushes the old namespace before loading the new.

mod cart;
mod favorites;
mod namespace;
mod persisted;
mod scoped;

pub use cart::CartStore;
pub use favorites::FavoritesStore;
pub use namespace::{StoreKind, resolve_key};
pub(crate) use persisted::{decode_user, encode_user};
