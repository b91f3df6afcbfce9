//! Serde helper functions for request deserialization.
//!
//! Clients built around HTML forms send every field, using empty strings for
//! the ones the user left blank. These helpers map those to `None`.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty or blank strings as None.
/// Surrounding whitespace is trimmed from non-empty values.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}
