use async_trait::async_trait;

use crate::book::{Entry, EntryId, UpdateEntryRequest};

use super::Result;

/// The hosted table of entries.
///
/// Every call is a network round trip and any of them may fail; callers
/// decide what a failure means.
#[async_trait]
pub trait RemoteEntryStore: Send + Sync {
    /// Gets every entry, ordered by title ascending.
    async fn select_all(&self) -> Result<Vec<Entry>>;

    /// Gets the ids of every entry.
    async fn select_ids(&self) -> Result<Vec<EntryId>>;

    /// Inserts one or many entries in a single request.
    async fn insert(&self, entries: &[Entry]) -> Result<()>;

    /// Applies a partial field replace to the entry with this id.
    async fn update(&self, id: EntryId, fields: &UpdateEntryRequest) -> Result<()>;

    /// Deletes the entry with this id.
    async fn delete(&self, id: EntryId) -> Result<()>;
}
