//! Deep copies and the persisted text form of models, both through `serde_json`.
//!
//! `deep_clone` goes through a `serde_json::Value` tree, so any value serde can
//! describe survives the copy. `encode`/`decode` produce the text stored between
//! runs.

use serde::{de::DeserializeOwned, Serialize};

use super::error::SerializationError;

pub fn encode<T>(value: &T) -> Result<String, SerializationError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string_pretty(value).map_err(SerializationError::Encode)
}

pub fn decode<T>(raw: &str) -> Result<T, SerializationError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(raw).map_err(SerializationError::Decode)
}

/// Returns an independent copy of `value` that shares nothing with it.
pub fn deep_clone<T>(value: &T) -> Result<T, SerializationError>
where
    T: Serialize + DeserializeOwned,
{
    let tree = serde_json::to_value(value).map_err(SerializationError::Encode)?;
    serde_json::from_value(tree).map_err(SerializationError::Decode)
}

/// [`deep_clone`] for an optional value; `None` stays `None`.
#[cfg(test)]
pub fn snapshot<T>(value: Option<&T>) -> Result<Option<T>, SerializationError>
where
    T: Serialize + DeserializeOwned,
{
    value.map(deep_clone).transpose()
}
