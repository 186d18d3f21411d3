//! Domain models for storefront.

pub mod session;
pub mod user;

pub use user::{NewAccount, UserRecord};
