//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Account registration, password login and profile settings
//! - `session` - The durable "who is logged in" slot

pub mod auth;
pub mod session;

pub use auth::{AuthError, AuthService};
pub use session::SessionIdentity;
