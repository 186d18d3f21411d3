//! Session-related types.
//!
//! Slots stored next to the cart and favorites namespaces for authentication
//! state.

/// Storage keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user (`{"state":{"userId":…}}`).
    pub const AUTH_SESSION: &str = "auth-session";
}
