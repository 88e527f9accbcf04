//! Local cache backends.
//!
//! Concrete implementations of `booklog_core::cache::Cache`. The file
//! backend is the default on-device store; the memory backend keeps
//! everything in the process and is what tests use.
//!
//! # Feature Flags
//!
//! - `sqlite`: adds a SQLite backend using `rusqlite` and `tokio-rusqlite`

pub mod file;
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::FileCache;
pub use memory::MemoryCache;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteCache;

use booklog_core::book::Entry;
use booklog_core::cache::{deserialize_entries, serialize_entries, Cache, CacheError, ENTRIES_KEY};

/// Reads the cached entry collection.
///
/// An absent slot, an unreadable slot and a slot that does not hold a
/// JSON array of entries all read as an empty collection.
pub async fn read_entries_or_empty<C>(cache: &C) -> Vec<Entry>
where
    C: Cache + ?Sized,
{
    load_entries(cache).await.unwrap_or_else(|err| {
        tracing::warn!(key = ENTRIES_KEY, error = %err, "Failed to read cached entries, treating as empty");
        Vec::new()
    })
}

/// Reads the cached entry collection ahead of rewriting it.
///
/// An absent slot and a slot that is not a JSON array read as empty.
/// A failed read, or an array with a row that does not decode, is an
/// error: the slot may still hold entries and must not be overwritten.
pub async fn load_entries<C>(cache: &C) -> Result<Vec<Entry>, CacheError>
where
    C: Cache + ?Sized,
{
    let Some(bytes) = cache.get(ENTRIES_KEY).await? else {
        return Ok(Vec::new());
    };

    match deserialize_entries(&bytes) {
        Ok(entries) => Ok(entries),
        Err(err) if err.holds_entries() => Err(CacheError::OperationFailed(err.to_string())),
        Err(err) => {
            tracing::warn!(key = ENTRIES_KEY, error = %err, "Cached entries are malformed, treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Replaces the cached entry collection.
pub async fn write_entries<C>(cache: &C, entries: &[Entry]) -> Result<(), CacheError>
where
    C: Cache + ?Sized,
{
    let bytes =
        serialize_entries(entries).map_err(|e| CacheError::OperationFailed(e.to_string()))?;
    cache.set(ENTRIES_KEY, &bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklog_core::book::EntryId;

    #[tokio::test]
    async fn test_read_absent_slot_is_empty() {
        let cache = MemoryCache::new();
        assert!(read_entries_or_empty(&cache).await.is_empty());
    }

    #[tokio::test]
    async fn test_read_malformed_slot_is_empty() {
        let cache = MemoryCache::new();
        cache.set(ENTRIES_KEY, b"{not json").await.unwrap();

        assert!(read_entries_or_empty(&cache).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_refuses_array_with_unreadable_row() {
        let cache = MemoryCache::new();
        cache
            .set(ENTRIES_KEY, br#"[{"id": 1, "title": "Dune", "author": "Frank Herbert"}, {"title": 5}]"#)
            .await
            .unwrap();

        assert!(matches!(
            load_entries(&cache).await,
            Err(CacheError::OperationFailed(_))
        ));
        assert!(read_entries_or_empty(&cache).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_garbage_slot_is_empty() {
        let cache = MemoryCache::new();
        cache.set(ENTRIES_KEY, b"{not json").await.unwrap();

        assert_eq!(load_entries(&cache).await, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let cache = MemoryCache::new();
        let entries = vec![Entry::new(EntryId(1), "Dune", "Frank Herbert")];

        write_entries(&cache, &entries).await.unwrap();

        assert_eq!(read_entries_or_empty(&cache).await, entries);
    }
}
