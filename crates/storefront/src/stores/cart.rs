//! Cart store.
//!
//! Thin, logging wrapper over a [`ScopedStore<Cart>`]: the cart rules live in
//! [`Cart`], the namespace protocol in [`ScopedStore`].

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use vida_saborosa_core::{Cart, CartCandidate, CartLineItem, MenuItemId, UserId};

use super::scoped::ScopedStore;
use crate::error::add_breadcrumb;
use crate::storage::KeyValueStorage;

/// The active user's cart, written through to storage on every change.
#[derive(Debug)]
pub struct CartStore {
    inner: ScopedStore<Cart>,
}

impl CartStore {
    /// Create an uninitialized cart store.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            inner: ScopedStore::new(storage),
        }
    }

    /// Add one unit of an item (incrementing an existing line).
    #[instrument(skip(self, candidate), fields(item_id = %candidate.id()))]
    pub fn add_item(&mut self, candidate: CartCandidate) {
        let id = candidate.id().to_string();
        self.inner.update(|cart| cart.add(candidate));
        debug!("item added to cart");
        add_breadcrumb("cart", "Added item to cart", Some(&[("item_id", id.as_str())]));
    }

    /// Set an item's quantity; zero removes the line. No-op for absent items.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, id: MenuItemId, quantity: u32) {
        if self.inner.update(|cart| cart.set_quantity(id, quantity)) {
            debug!("cart quantity updated");
            add_breadcrumb(
                "cart",
                "Changed item quantity",
                Some(&[
                    ("item_id", id.to_string().as_str()),
                    ("quantity", quantity.to_string().as_str()),
                ]),
            );
        }
    }

    /// Remove one unit of an item; the last unit removes the line.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: MenuItemId) {
        if self.inner.update(|cart| cart.remove_one(id)) {
            debug!("item removed from cart");
            add_breadcrumb(
                "cart",
                "Removed item from cart",
                Some(&[("item_id", id.to_string().as_str())]),
            );
        }
    }

    /// Empty the cart. The empty list is persisted even if nothing changed.
    pub fn clear(&mut self) {
        self.inner.update(|cart| {
            cart.clear();
            true
        });
        debug!("cart cleared");
        add_breadcrumb("cart", "Cleared cart", None);
    }

    /// Quantity of an item, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, id: MenuItemId) -> u32 {
        self.inner.value().quantity_of(id)
    }

    /// Σ(unit price × quantity).
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.inner.value().total_price()
    }

    /// Σ(quantity).
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.inner.value().total_item_count()
    }

    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.inner.value().items()
    }

    /// The whole cart value.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        self.inner.value()
    }

    /// Activate `user`'s cart (see [`ScopedStore::switch_user`]).
    pub fn switch_user(&mut self, user: Option<UserId>) {
        self.inner.switch_user(user);
    }

    /// Reload the cart of the user active in the previous process.
    pub fn restore(&mut self) {
        self.inner.restore();
    }

    /// Forget the active user and erase the guest cart.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// User whose cart is loaded (`None` for guest or uninitialized).
    #[must_use]
    pub fn active_user(&self) -> Option<&UserId> {
        self.inner.active_user()
    }

    /// Whether the cart has been loaded from storage.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }
}
