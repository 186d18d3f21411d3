//! Vida Saborosa Core - Shared domain types.
//!
//! This crate provides the types used across all Vida Saborosa components:
//! - `storefront` - Cart/favorites stores, accounts, catalog and session wiring
//! - `cli` - Command-line front end for browsing, cart and account management
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! storage access. Stores in `storefront` compute the next state here and then
//! persist it, so the persistence backend never leaks into the cart rules.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, emails, user ids, carts and favorites

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
