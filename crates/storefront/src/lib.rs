//! Vida Saborosa storefront library.
//!
//! Per-user cart and favorites stores with write-through persistence, the
//! password accounts that decide whose cart is active, and the static
//! restaurant catalog. Front ends (the `vs-cli` binary, tests) drive it
//! through [`state::StorefrontSession`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;

pub use state::StorefrontSession;
