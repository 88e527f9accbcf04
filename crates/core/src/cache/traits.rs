use async_trait::async_trait;

use super::Result;

/// A device-local key-value store holding serialized values in named slots.
///
/// Every slot is independent. Writing a slot replaces its previous value.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets the value stored in a slot, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the value stored in a slot.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Empties a slot. Emptying an empty slot is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
