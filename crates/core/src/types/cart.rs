//! Shopping cart state and its pure transitions.
//!
//! Every mutating method returns whether the cart changed so callers can
//! decide whether to persist. Nothing here performs I/O.
//!
//! ## Invariants
//!
//! - No two line items share a [`MenuItemId`]
//! - Every line item has `quantity >= 1`
//! - Insertion order is display order

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MenuItemId;

/// Errors that can occur when building a [`CartCandidate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Unit prices must be zero or positive.
    #[error("unit price cannot be negative (got {0})")]
    NegativePrice(Decimal),
    /// Items must have a display name.
    #[error("item name cannot be empty")]
    EmptyName,
}

/// An item offered for adding to the cart (a line item without quantity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartCandidate {
    id: MenuItemId,
    name: String,
    unit_price: Decimal,
    image_ref: Option<String>,
}

impl CartCandidate {
    /// Create a candidate.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NegativePrice` for a price below zero and
    /// `CartError::EmptyName` for a blank name.
    pub fn new(
        id: MenuItemId,
        name: impl Into<String>,
        unit_price: Decimal,
        image_ref: Option<String>,
    ) -> Result<Self, CartError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CartError::EmptyName);
        }
        if unit_price < Decimal::ZERO {
            return Err(CartError::NegativePrice(unit_price));
        }
        Ok(Self {
            id,
            name,
            unit_price,
            image_ref,
        })
    }

    /// The menu item id.
    #[must_use]
    pub const fn id(&self) -> MenuItemId {
        self.id
    }
}

/// One line of the cart.
///
/// Serialized with the field names of the persisted cart slot:
/// `{"id":1,"name":"…","price":"25.90","quantity":2,"image":"…"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(rename = "image", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl CartLineItem {
    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl From<CartCandidate> for CartLineItem {
    fn from(candidate: CartCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            unit_price: candidate.unit_price,
            quantity: 1,
            image_ref: candidate.image_ref,
        }
    }
}

/// An ordered list of line items belonging to one user namespace.
///
/// Serializes as a bare JSON array. Deserializing goes through
/// [`Cart::from_items`], so stored data can never break the invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Serialize for Cart {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Self::from_items(items)
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored line items, restoring the invariants.
    ///
    /// Lines with zero quantity or a negative price are dropped, and repeated
    /// ids are merged into the first occurrence.
    #[must_use]
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 || item.unit_price < Decimal::ZERO {
                continue;
            }
            match cart.position(item.id) {
                Some(idx) => {
                    if let Some(existing) = cart.items.get_mut(idx) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn position(&self, id: MenuItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Add one unit of `candidate`.
    ///
    /// Increments the existing line or appends a new one with quantity 1.
    /// Always changes the cart. Quantities saturate at `u32::MAX`.
    pub fn add(&mut self, candidate: CartCandidate) -> bool {
        match self.items.iter_mut().find(|item| item.id == candidate.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartLineItem::from(candidate)),
        }
        true
    }

    /// Replace the quantity of an existing line.
    ///
    /// A quantity of zero deletes the line outright. Returns `false` if the
    /// item is not in the cart or already has that quantity.
    pub fn set_quantity(&mut self, id: MenuItemId, quantity: u32) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        if quantity == 0 {
            self.items.remove(idx);
            return true;
        }
        match self.items.get_mut(idx) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove one unit of an item, deleting the line when it reaches zero.
    ///
    /// Returns `false` if the item is not in the cart.
    pub fn remove_one(&mut self, id: MenuItemId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        match self.items.get_mut(idx) {
            Some(item) if item.quantity > 1 => item.quantity -= 1,
            _ => {
                self.items.remove(idx);
            }
        }
        true
    }

    /// Remove every line. Returns `false` if the cart was already empty.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    /// Quantity of an item, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, id: MenuItemId) -> u32 {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map_or(0, |item| item.quantity)
    }

    /// Σ(unit price × quantity).
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Σ(quantity).
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
