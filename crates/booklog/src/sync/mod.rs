//! The sync layer.
//!
//! Presents one entry collection over a remote store and a local cache.
//! Reads trust the remote and fall back to the cache; writes go to both
//! and always land in the cache, whatever the remote said.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let remote = Arc::new(RestEntryStore::new(url, "book_entries", key, timeout)?);
//! let cache = Arc::new(FileCache::new(".booklog"));
//!
//! let store = SyncedEntryStore::new(remote, cache);
//! store.migrate_local_to_remote().await;
//! let (entries, source) = store.read_all().await;
//! ```

mod entry;

pub use entry::SyncedEntryStore;
