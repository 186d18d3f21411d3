//! Serialized shapes of the storage slots.
//!
//! Every slot is a JSON object with a single `state` member:
//!
//! ```json
//! { "state": { "cart": [ { "id": 1, "name": "…", "price": "25.90", "quantity": 2 } ] } }
//! { "state": { "favorites": { "3": true } } }
//! { "state": { "userId": "a@x.com" } }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use vida_saborosa_core::{Cart, Favorites, UserId};

use super::StoreKind;

/// A value that lives in a per-user namespace.
pub trait PersistedState: Default + Serialize + DeserializeOwned {
    /// Store the value belongs to; selects key prefix and `state` field.
    const KIND: StoreKind;
}

impl PersistedState for Cart {
    const KIND: StoreKind = StoreKind::Cart;
}

impl PersistedState for Favorites {
    const KIND: StoreKind = StoreKind::Favorites;
}

#[derive(Debug, Default, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    state: Map<String, Value>,
}

/// Serialize a namespace value into its slot representation.
///
/// # Errors
///
/// Returns `serde_json::Error` if the value cannot be serialized.
pub fn encode_state<T: PersistedState>(value: &T) -> Result<String, serde_json::Error> {
    let mut state = Map::new();
    state.insert(T::KIND.as_str().to_owned(), serde_json::to_value(value)?);
    let mut envelope = Map::new();
    envelope.insert("state".to_owned(), Value::Object(state));
    serde_json::to_string(&envelope)
}

/// Parse a slot. A slot without the expected field decodes as empty.
///
/// # Errors
///
/// Returns `serde_json::Error` for malformed JSON or a field of the wrong shape.
pub fn decode_state<T: PersistedState>(raw: &str) -> Result<T, serde_json::Error> {
    let mut envelope: RawEnvelope = serde_json::from_str(raw)?;
    envelope
        .state
        .remove(T::KIND.as_str())
        .map_or_else(|| Ok(T::default()), serde_json::from_value)
}

/// `{"userId": …}` inside a user pointer slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPointer {
    #[serde(default)]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PointerEnvelope {
    #[serde(default)]
    state: UserPointer,
}

/// Serialize a user pointer slot.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn encode_user(user: Option<&UserId>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&PointerEnvelope {
        state: UserPointer {
            user_id: user.cloned(),
        },
    })
}

/// Parse a user pointer slot.
///
/// # Errors
///
/// Returns `serde_json::Error` for malformed JSON or an invalid user id.
pub fn decode_user(raw: &str) -> Result<Option<UserId>, serde_json::Error> {
    let envelope: PointerEnvelope = serde_json::from_str(raw)?;
    Ok(envelope.state.user_id)
}
