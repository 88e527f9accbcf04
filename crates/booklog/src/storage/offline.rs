use async_trait::async_trait;

use booklog_core::book::{Entry, EntryId, UpdateEntryRequest};
use booklog_core::storage::{RemoteEntryStore, RepositoryError, Result};

const NO_REMOTE: &str = "no remote configured";

/// Stand-in used when no remote URL is configured.
///
/// Every call fails as unreachable, so the sync layer serves and mutates
/// the local cache only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineStore;

fn unreachable<T>() -> Result<T> {
    Err(RepositoryError::ConnectionFailed(NO_REMOTE.to_string()))
}

#[async_trait]
impl RemoteEntryStore for OfflineStore {
    async fn select_all(&self) -> Result<Vec<Entry>> {
        unreachable()
    }

    async fn select_ids(&self) -> Result<Vec<EntryId>> {
        unreachable()
    }

    async fn insert(&self, _entries: &[Entry]) -> Result<()> {
        unreachable()
    }

    async fn update(&self, _id: EntryId, _fields: &UpdateEntryRequest) -> Result<()> {
        unreachable()
    }

    async fn delete(&self, _id: EntryId) -> Result<()> {
        unreachable()
    }
}
