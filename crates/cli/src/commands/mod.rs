//! Subcommand implementations.
//!
//! Each command writes its human-readable result to `out` and returns a
//! [`CommandError`] on failure; `main` logs it and exits non-zero.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod favorites;

use thiserror::Error;

use vida_saborosa_core::{CartError, MenuItemId};
use vida_saborosa_storefront::catalog::UnknownCategory;
use vida_saborosa_storefront::error::AppError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Storefront operation failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// Menu item id not in the catalog.
    #[error("no menu item with id {0}")]
    UnknownMenuItem(MenuItemId),

    /// Category filter not recognised.
    #[error("{0} (expected one of: hamburguer, pizza, lanche, saudavel, bebidas, sobremesas)")]
    UnknownCategory(#[from] UnknownCategory),

    /// Catalog entry cannot be put in a cart.
    #[error("invalid menu item: {0}")]
    Cart(#[from] CartError),
}

impl CommandError {
    /// Log the error; storefront faults also go to Sentry.
    pub fn report(&self) {
        match self {
            Self::App(app) => app.report(),
            Self::Io(_) | Self::Cart(_) => tracing::error!("Command failed: {self}"),
            Self::UnknownMenuItem(_) | Self::UnknownCategory(_) => {
                tracing::warn!("Command rejected: {self}");
            }
        }
    }
}
