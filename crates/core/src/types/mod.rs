//! Core types for Vida Saborosa.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod favorites;
pub mod id;
pub mod price;
pub mod user;

pub use cart::{Cart, CartCandidate, CartError, CartLineItem};
pub use email::{Email, EmailError};
pub use favorites::Favorites;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use user::{UserId, UserIdError};
