use std::sync::Arc;

use tokio::sync::Mutex;

use booklog_core::book::{Entry, EntryId, UpdateEntryRequest};
use booklog_core::cache::Cache;
use booklog_core::storage::RemoteEntryStore;
use booklog_core::sync::{
    append_entry, entries_missing_remotely, merge_update, remove_entry, ConsistencyPolicy,
    MigrationOutcome, ReadSource, SyncOutcome,
};

use crate::cache::{load_entries, read_entries_or_empty, write_entries};

/// Entry store that keeps a local cache in step with a remote store.
///
/// None of its operations fail. Remote and cache errors are logged and
/// the operation degrades to whatever the cache can provide; the
/// returned outcomes say what actually happened.
///
/// # Type Parameters
///
/// * `R` - The remote store; may be `dyn RemoteEntryStore`
/// * `C` - The local cache; may be `dyn Cache`
pub struct SyncedEntryStore<R: ?Sized, C: ?Sized> {
    remote: Arc<R>,
    cache: Arc<C>,
    policy: ConsistencyPolicy,
    /// Held across every read-modify-write of the cached collection.
    cache_lock: Mutex<()>,
}

impl<R, C> SyncedEntryStore<R, C>
where
    R: RemoteEntryStore + ?Sized,
    C: Cache + ?Sized,
{
    pub fn new(remote: Arc<R>, cache: Arc<C>) -> Self {
        Self {
            remote,
            cache,
            policy: ConsistencyPolicy::default(),
            cache_lock: Mutex::new(()),
        }
    }

    /// Reads every entry.
    ///
    /// A non-empty remote result replaces the cache and is returned. An
    /// empty result or a remote failure returns the cache as it is.
    pub async fn read_all(&self) -> (Vec<Entry>, ReadSource) {
        match self.remote.select_all().await {
            Ok(entries) if self.policy.mirrors_fetch(&entries) => {
                let _guard = self.cache_lock.lock().await;
                match write_entries(&*self.cache, &entries).await {
                    Ok(()) => tracing::debug!(count = entries.len(), "Cache mirrored remote entries"),
                    Err(err) => tracing::warn!(error = %err, "Failed to mirror remote entries"),
                }
                (entries, ReadSource::Remote)
            }
            Ok(_) => {
                tracing::debug!("Remote returned no entries, serving cache");
                (self.cached_entries().await, ReadSource::Cache)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Remote read failed, serving cache");
                (self.cached_entries().await, ReadSource::Cache)
            }
        }
    }

    /// Stores a new entry. The caller assigns its id.
    pub async fn create(&self, entry: &Entry) -> SyncOutcome {
        let remote_applied = match self.remote.insert(std::slice::from_ref(entry)).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(entry_id = %entry.id, error = %err, "Remote insert failed");
                false
            }
        };

        let cache_changed = self.policy.applies_locally(remote_applied)
            && self
                .modify_cache(entry.id, |entries| {
                    append_entry(entries, entry.clone());
                    true
                })
                .await;

        SyncOutcome {
            remote_applied,
            cache_changed,
        }
    }

    /// Replaces the given fields of the entry with this id.
    ///
    /// An id the cache does not hold leaves the cache alone.
    pub async fn update(&self, id: EntryId, fields: &UpdateEntryRequest) -> SyncOutcome {
        let remote_applied = match self.remote.update(id, fields).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(entry_id = %id, error = %err, "Remote update failed");
                false
            }
        };

        let cache_changed = self.policy.applies_locally(remote_applied)
            && self
                .modify_cache(id, |entries| merge_update(entries, id, fields))
                .await;

        SyncOutcome {
            remote_applied,
            cache_changed,
        }
    }

    /// Removes the entry with this id from both stores.
    pub async fn delete(&self, id: EntryId) -> SyncOutcome {
        let remote_applied = match self.remote.delete(id).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(entry_id = %id, error = %err, "Remote delete failed");
                false
            }
        };

        let cache_changed = self.policy.applies_locally(remote_applied)
            && self
                .modify_cache(id, |entries| remove_entry(entries, id))
                .await;

        SyncOutcome {
            remote_applied,
            cache_changed,
        }
    }

    /// Copies cached entries the remote does not know about up to it.
    ///
    /// Meant to run once at startup. Any failure abandons the attempt;
    /// it is not retried.
    pub async fn migrate_local_to_remote(&self) -> MigrationOutcome {
        let local = self.cached_entries().await;
        if local.is_empty() {
            tracing::debug!("No local entries to migrate");
            return MigrationOutcome::NothingLocal;
        }

        let remote_ids = match self.remote.select_ids().await {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!(error = %err, "Migration aborted: could not list remote ids");
                return MigrationOutcome::Aborted;
            }
        };

        let missing = entries_missing_remotely(&local, &remote_ids);
        if missing.is_empty() {
            tracing::debug!(local = local.len(), "Remote already has every local entry");
            return MigrationOutcome::UpToDate;
        }

        match self.remote.insert(&missing).await {
            Ok(()) => {
                tracing::info!(count = missing.len(), "Migrated local entries to remote");
                MigrationOutcome::Inserted(missing.len())
            }
            Err(err) => {
                tracing::warn!(count = missing.len(), error = %err, "Migration aborted: insert failed");
                MigrationOutcome::Aborted
            }
        }
    }

    async fn cached_entries(&self) -> Vec<Entry> {
        let _guard = self.cache_lock.lock().await;
        read_entries_or_empty(&*self.cache).await
    }

    /// Reads the cached collection, applies `change` and writes it back
    /// if `change` reports a modification. Returns whether a write landed.
    ///
    /// A slot that could not be read is left as it is.
    async fn modify_cache<F>(&self, entry_id: EntryId, change: F) -> bool
    where
        F: FnOnce(&mut Vec<Entry>) -> bool,
    {
        let _guard = self.cache_lock.lock().await;
        let mut entries = match load_entries(&*self.cache).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(entry_id = %entry_id, error = %err, "Cached entries unreadable, leaving cache untouched");
                return false;
            }
        };

        if !change(&mut entries) {
            tracing::trace!(entry_id = %entry_id, "Cache unchanged");
            return false;
        }

        match write_entries(&*self.cache, &entries).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(entry_id = %entry_id, error = %err, "Failed to write cache");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use booklog_core::book::{Genre, TimeScaleDot};
    use booklog_core::cache::{CacheError, Result as CacheResult, ENTRIES_KEY};

    use crate::cache::MemoryCache;
    use crate::storage::{InMemoryEntryStore, OfflineStore};

    // Cache whose writes always fail
    struct ReadOnlyCache {
        inner: MemoryCache,
    }

    #[async_trait]
    impl Cache for ReadOnlyCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            self.inner.get(key).await
        }

        async fn set(&self, _key: &str, _value: &[u8]) -> CacheResult<()> {
            Err(CacheError::Unavailable("read-only".to_string()))
        }

        async fn delete(&self, _key: &str) -> CacheResult<()> {
            Err(CacheError::Unavailable("read-only".to_string()))
        }
    }

    fn entry(id: i64, title: &str) -> Entry {
        Entry::new(EntryId(id), title, "Some Author")
    }

    fn full_entry(id: i64) -> Entry {
        let mut e = Entry::new(EntryId(id), "The Left Hand of Darkness", "Ursula K. Le Guin")
            .with_genre(Genre::ScienceFiction)
            .with_favorite(true)
            .with_coordinates("45.5", "-122.6")
            .with_time_scale_dot(TimeScaleDot::new(0.3, 0.6).unwrap());
        e.publication_year = Some("1969".to_string());
        e.thoughts = Some("Winter.".to_string());
        e
    }

    fn setup(
        remote: InMemoryEntryStore,
    ) -> (
        SyncedEntryStore<InMemoryEntryStore, MemoryCache>,
        Arc<InMemoryEntryStore>,
        Arc<MemoryCache>,
    ) {
        let remote = Arc::new(remote);
        let cache = Arc::new(MemoryCache::new());
        let store = SyncedEntryStore::new(remote.clone(), cache.clone());
        (store, remote, cache)
    }

    async fn seed_cache(cache: &MemoryCache, entries: &[Entry]) {
        write_entries(cache, entries).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_all_mirrors_non_empty_remote() {
        let (store, _remote, cache) =
            setup(InMemoryEntryStore::with_entries(vec![entry(1, "Beta"), entry(2, "Alpha")]));
        seed_cache(&cache, &[entry(9, "Stale")]).await;

        let (entries, source) = store.read_all().await;

        assert_eq!(source, ReadSource::Remote);
        assert_eq!(entries, vec![entry(2, "Alpha"), entry(1, "Beta")]);
        assert_eq!(read_entries_or_empty(&*cache).await, entries);
    }

    #[tokio::test]
    async fn test_read_all_empty_remote_leaves_cache_untouched() {
        let (store, _remote, cache) = setup(InMemoryEntryStore::new());
        seed_cache(&cache, &[entry(1, "Local only")]).await;

        let (entries, source) = store.read_all().await;

        assert_eq!(source, ReadSource::Cache);
        assert_eq!(entries, vec![entry(1, "Local only")]);
        assert_eq!(read_entries_or_empty(&*cache).await, entries);
    }

    #[tokio::test]
    async fn test_read_all_falls_back_to_cache_on_outage() {
        let (store, remote, cache) =
            setup(InMemoryEntryStore::with_entries(vec![entry(1, "Remote")]));
        seed_cache(&cache, &[entry(2, "Cached")]).await;
        remote.set_available(false);

        let (entries, source) = store.read_all().await;

        assert_eq!(source, ReadSource::Cache);
        assert_eq!(entries, vec![entry(2, "Cached")]);
    }

    #[tokio::test]
    async fn test_read_all_malformed_cache_reads_as_empty() {
        let (store, remote, cache) = setup(InMemoryEntryStore::new());
        cache.set(ENTRIES_KEY, b"definitely not json").await.unwrap();
        remote.set_available(false);

        let (entries, source) = store.read_all().await;

        assert!(entries.is_empty());
        assert_eq!(source, ReadSource::Cache);
    }

    #[tokio::test]
    async fn test_create_keeps_cached_entries_with_unknown_genres() {
        let cache = Arc::new(MemoryCache::new());
        cache
            .set(
                ENTRIES_KEY,
                br#"[
                    {"id": 1, "title": "The Hobbit", "author": "J. R. R. Tolkien", "genres": ["Fantasy"], "favorite": "yes"},
                    {"id": 2, "title": "Neuromancer", "author": "William Gibson", "genres": ["Sci-Fi"]}
                ]"#,
            )
            .await
            .unwrap();
        let store = SyncedEntryStore::new(Arc::new(OfflineStore), cache.clone());

        let (before, _) = store.read_all().await;
        let outcome = store.create(&entry(3, "Emma")).await;
        let (after, source) = store.read_all().await;

        assert_eq!(before.len(), 2);
        assert!(outcome.cache_changed);
        assert_eq!(source, ReadSource::Cache);
        let ids: Vec<EntryId> = after.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntryId(1), EntryId(2), EntryId(3)]);
        assert!(after[0].favorite);
    }

    #[tokio::test]
    async fn test_writes_leave_unreadable_cache_untouched() {
        let (store, remote, cache) = setup(InMemoryEntryStore::new());
        let stored: &[u8] =
            br#"[{"id": 1, "title": "Kept", "author": "A"}, {"id": "not-a-number", "title": "B"}]"#;
        cache.set(ENTRIES_KEY, stored).await.unwrap();
        remote.set_available(false);

        let created = store.create(&entry(3, "New")).await;
        let deleted = store.delete(EntryId(1)).await;

        assert!(!created.cache_changed);
        assert!(!deleted.cache_changed);
        assert_eq!(cache.get(ENTRIES_KEY).await.unwrap().as_deref(), Some(stored));
    }

    #[tokio::test]
    async fn test_create_then_read_all_keeps_every_field() {
        let (store, _remote, _cache) = setup(InMemoryEntryStore::new());
        let e = full_entry(1718447400000);

        let outcome = store.create(&e).await;
        let (entries, source) = store.read_all().await;

        assert_eq!(
            outcome,
            SyncOutcome {
                remote_applied: true,
                cache_changed: true
            }
        );
        assert_eq!(source, ReadSource::Remote);
        assert_eq!(entries, vec![e]);
    }

    #[tokio::test]
    async fn test_create_during_outage_is_readable_from_cache() {
        let (store, remote, _cache) = setup(InMemoryEntryStore::new());
        remote.set_available(false);

        let outcome = store.create(&entry(1, "Offline")).await;
        let (entries, source) = store.read_all().await;

        assert!(!outcome.remote_applied);
        assert!(outcome.cache_changed);
        assert_eq!(source, ReadSource::Cache);
        assert_eq!(entries, vec![entry(1, "Offline")]);
        assert_eq!(remote.inserted_count(), 0);
    }

    #[tokio::test]
    async fn test_update_during_outage_still_updates_cache() {
        let (store, remote, cache) = setup(InMemoryEntryStore::new());
        seed_cache(&cache, &[entry(1, "Old"), entry(2, "Other")]).await;
        remote.set_available(false);

        let fields = UpdateEntryRequest::new().with_title("New").with_favorite(true);
        let outcome = store.update(EntryId(1), &fields).await;

        assert!(!outcome.remote_applied);
        assert!(outcome.cache_changed);
        let cached = read_entries_or_empty(&*cache).await;
        assert_eq!(cached[0].title, "New");
        assert!(cached[0].favorite);
        assert_eq!(cached[1], entry(2, "Other"));
    }

    #[tokio::test]
    async fn test_delete_during_outage_still_updates_cache() {
        let (store, remote, cache) = setup(InMemoryEntryStore::new());
        seed_cache(&cache, &[entry(1, "Gone"), entry(2, "Kept")]).await;
        remote.set_available(false);

        let outcome = store.delete(EntryId(1)).await;

        assert!(outcome.cache_changed);
        assert_eq!(read_entries_or_empty(&*cache).await, vec![entry(2, "Kept")]);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_noops() {
        let (store, _remote, cache) = setup(InMemoryEntryStore::new());
        seed_cache(&cache, &[entry(1, "Only")]).await;

        let updated = store
            .update(EntryId(42), &UpdateEntryRequest::new().with_title("x"))
            .await;
        let deleted = store.delete(EntryId(42)).await;

        assert_eq!(
            updated,
            SyncOutcome {
                remote_applied: false,
                cache_changed: false
            }
        );
        assert!(!deleted.cache_changed);
        assert_eq!(read_entries_or_empty(&*cache).await, vec![entry(1, "Only")]);
    }

    #[tokio::test]
    async fn test_create_replaces_cached_entry_with_same_id() {
        let (store, _remote, cache) = setup(InMemoryEntryStore::new());
        seed_cache(&cache, &[entry(1, "First")]).await;

        store.create(&entry(1, "Second")).await;

        assert_eq!(read_entries_or_empty(&*cache).await, vec![entry(1, "Second")]);
    }

    #[tokio::test]
    async fn test_migrate_nothing_local() {
        let (store, remote, _cache) = setup(InMemoryEntryStore::new());

        assert_eq!(
            store.migrate_local_to_remote().await,
            MigrationOutcome::NothingLocal
        );
        assert_eq!(remote.inserted_count(), 0);
    }

    #[tokio::test]
    async fn test_migrate_inserts_only_missing_and_is_idempotent() {
        let (store, remote, cache) =
            setup(InMemoryEntryStore::with_entries(vec![entry(1, "Already there")]));
        seed_cache(
            &cache,
            &[entry(1, "Already there"), entry(2, "Local"), entry(3, "Local too")],
        )
        .await;

        let first = store.migrate_local_to_remote().await;
        let second = store.migrate_local_to_remote().await;

        assert_eq!(first, MigrationOutcome::Inserted(2));
        assert_eq!(second, MigrationOutcome::UpToDate);
        assert_eq!(second.inserted(), 0);
        assert_eq!(remote.inserted_count(), 2);
        assert_eq!(remote.snapshot().await.len(), 3);
    }

    #[tokio::test]
    async fn test_migrate_aborts_on_outage() {
        let (store, remote, cache) = setup(InMemoryEntryStore::new());
        seed_cache(&cache, &[entry(1, "Local")]).await;
        remote.set_available(false);

        assert_eq!(store.migrate_local_to_remote().await, MigrationOutcome::Aborted);

        remote.set_available(true);
        assert_eq!(store.migrate_local_to_remote().await, MigrationOutcome::Inserted(1));
    }

    #[tokio::test]
    async fn test_cache_write_failure_is_reported_not_raised() {
        let remote = Arc::new(InMemoryEntryStore::new());
        let cache = Arc::new(ReadOnlyCache {
            inner: MemoryCache::new(),
        });
        let store = SyncedEntryStore::new(remote.clone(), cache);

        let outcome = store.create(&entry(1, "A")).await;
        let (entries, source) = store.read_all().await;

        assert!(outcome.remote_applied);
        assert!(!outcome.cache_changed);
        assert_eq!(source, ReadSource::Remote);
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_works_behind_trait_objects() {
        let remote: Arc<dyn RemoteEntryStore> = Arc::new(InMemoryEntryStore::new());
        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
        let store = SyncedEntryStore::new(remote, cache);

        store.create(&entry(1, "Dyn")).await;

        assert_eq!(store.read_all().await.0, vec![entry(1, "Dyn")]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_do_not_lose_writes() {
        let remote = InMemoryEntryStore::new();
        remote.set_available(false);
        let (store, _remote, cache) = setup(remote);
        let store = Arc::new(store);

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(&entry(i, "Concurrent")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(read_entries_or_empty(&*cache).await.len(), 20);
    }
}
