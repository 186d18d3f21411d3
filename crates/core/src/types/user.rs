//! Session user identity.
//!
//! A [`UserId`] names the storage namespace of an authenticated user. The
//! anonymous session has no `UserId` at all (`Option<UserId>::None`), and the
//! word reserved for its namespace can never be used as a real id.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Email;

/// Errors that can occur when constructing a [`UserId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// The id is empty or whitespace.
    #[error("user id cannot be empty")]
    Empty,
    /// The id collides with the anonymous namespace.
    #[error("user id '{0}' is reserved")]
    Reserved(String),
}

/// Identity of an authenticated user (in practice their account email).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Namespace suffix used for the anonymous session.
    pub const GUEST: &'static str = "guest";

    /// Parse a `UserId` from a string.
    ///
    /// # Errors
    ///
    /// Returns `UserIdError::Empty` for blank input and
    /// `UserIdError::Reserved` for the guest namespace name.
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(UserIdError::Empty);
        }
        if s.eq_ignore_ascii_case(Self::GUEST) {
            return Err(UserIdError::Reserved(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Email> for UserId {
    fn from(email: &Email) -> Self {
        // Emails always contain '@', so they can never be empty or "guest".
        Self(email.as_str().to_owned())
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
