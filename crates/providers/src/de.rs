//! Serde helpers for loosely typed upstream payloads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a JSON string or number and keep it as a string.
///
/// Farcaster ids come back as numbers from some endpoints and as strings
/// from others. Empty strings and any other JSON type become `None`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
