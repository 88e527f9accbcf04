//! Pure functions for turning the entry collection into cache bytes and back.
//!
//! The cache slot holds a plain JSON array, the same shape the remote
//! table returns, so a slot can be inspected or seeded by hand.

use crate::book::Entry;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
    /// The bytes hold a JSON array but at least one row is not an entry.
    #[error("Unreadable entry at index {index}: {message}")]
    UnreadableEntry { index: usize, message: String },
}

impl SerializationError {
    /// Whether the bytes may still hold entries worth keeping.
    pub fn holds_entries(&self) -> bool {
        matches!(self, SerializationError::UnreadableEntry { .. })
    }
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes the entry collection to JSON bytes.
pub fn serialize_entries(entries: &[Entry]) -> Result<Vec<u8>> {
    serde_json::to_vec(entries).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to the entry collection.
///
/// Bytes that are not a JSON array fail with `DeserializeFailed`. An
/// array with a row that does not decode fails with `UnreadableEntry`.
pub fn deserialize_entries(bytes: &[u8]) -> Result<Vec<Entry>> {
    let rows: Vec<serde_json::Value> = serde_json::from_slice(bytes)
        .map_err(|e| SerializationError::DeserializeFailed(e.to_string()))?;

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value(row).map_err(|e| SerializationError::UnreadableEntry {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}
