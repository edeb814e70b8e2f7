//! Explicit `null` handling.
//!
//! `#[serde(default)]` only covers missing keys. The board API also sends
//! `null` for unset columns, which must read as the field's default.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
///
/// Use together with `#[serde(default)]` so that missing keys are covered too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
