//! Deterministic JSON for manifests and plan fingerprints.
//!
//! Object keys are sorted recursively before writing, so two values that
//! differ only in map insertion order produce identical bytes and hashes.

use ::serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::errors::{ErrorInfo, SwmbError};

fn json_error(code: &str, err: serde_json::Error) -> SwmbError {
    SwmbError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, val)| (key, sort_keys(val)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        scalar => scalar,
    }
}

/// Pretty-printed JSON with sorted object keys.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SwmbError> {
    let tree = serde_json::to_value(value).map_err(|err| json_error("swmb_core.json_encode", err))?;
    serde_json::to_vec_pretty(&sort_keys(tree)).map_err(|err| json_error("swmb_core.json_write", err))
}

/// Decodes a manifest or summary written by [`to_canonical_json_bytes`].
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, SwmbError> {
    serde_json::from_slice(data).map_err(|err| json_error("swmb_core.json_read", err))
}

/// Hex SHA-256 of the canonical JSON form.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, SwmbError> {
    let digest = Sha256::digest(to_canonical_json_bytes(value)?);
    Ok(format!("{digest:x}"))
}
