use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use booklog_core::book::{sort_entries, Entry, EntryId, SortKey, UpdateEntryRequest};
use booklog_core::storage::{RemoteEntryStore, RepositoryError, Result};

/// In-memory remote store.
///
/// Rows live in a `BTreeMap` behind `Arc<RwLock<_>>`; clones share the
/// same table, availability switch and insert counter.
#[derive(Debug, Clone)]
pub struct InMemoryEntryStore {
    entries: Arc<RwLock<BTreeMap<EntryId, Entry>>>,
    available: Arc<AtomicBool>,
    inserted: Arc<AtomicUsize>,
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEntryStore {
    /// Creates an empty, reachable store.
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    /// Creates a reachable store holding these rows. Seeded rows do not
    /// count as inserted.
    pub fn with_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(
                entries.into_iter().map(|e| (e.id, e)).collect(),
            )),
            available: Arc::new(AtomicBool::new(true)),
            inserted: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Simulates the remote going down (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Total rows inserted through [`RemoteEntryStore::insert`].
    pub fn inserted_count(&self) -> usize {
        self.inserted.load(Ordering::SeqCst)
    }

    /// Current rows, ordered by id.
    pub async fn snapshot(&self) -> Vec<Entry> {
        self.entries.read().await.values().cloned().collect()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepositoryError::ConnectionFailed(
                "remote store unavailable".to_string(),
            ))
        }
    }
}

#[async_trait]
impl RemoteEntryStore for InMemoryEntryStore {
    async fn select_all(&self) -> Result<Vec<Entry>> {
        self.ensure_available()?;
        let mut entries: Vec<Entry> = self.entries.read().await.values().cloned().collect();
        sort_entries(&mut entries, SortKey::Title);
        Ok(entries)
    }

    async fn select_ids(&self) -> Result<Vec<EntryId>> {
        self.ensure_available()?;
        Ok(self.entries.read().await.keys().copied().collect())
    }

    async fn insert(&self, entries: &[Entry]) -> Result<()> {
        self.ensure_available()?;
        let mut table = self.entries.write().await;

        // All or nothing, like a single multi-row INSERT.
        if let Some(dup) = entries.iter().find(|e| table.contains_key(&e.id)) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Entry",
                id: dup.id.to_string(),
            });
        }
        for entry in entries {
            table.insert(entry.id, entry.clone());
        }
        self.inserted.fetch_add(entries.len(), Ordering::SeqCst);
        Ok(())
    }

    async fn update(&self, id: EntryId, fields: &UpdateEntryRequest) -> Result<()> {
        self.ensure_available()?;
        let mut table = self.entries.write().await;
        match table.get_mut(&id) {
            Some(entry) => {
                fields.apply_to(entry);
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity_type: "Entry",
                id: id.to_string(),
            }),
        }
    }

    async fn delete(&self, id: EntryId) -> Result<()> {
        self.ensure_available()?;
        let mut table = self.entries.write().await;
        if table.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "Entry",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
