use std::collections::HashSet;

use crate::book::{Entry, EntryId, UpdateEntryRequest};

/// The consistency policy between the local cache and the remote store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsistencyPolicy {
    /// Writes go to both stores and the cache is updated whatever the
    /// remote answered. Reads trust the remote whenever it returns data
    /// and overwrite the cache with it. The two stores may diverge while
    /// the remote is failing and converge on the next successful read.
    #[default]
    EventualRemoteAuthoritative,
}

impl ConsistencyPolicy {
    /// Whether a successful remote fetch should replace the cache.
    ///
    /// An empty fetch never does; the cache may still hold entries that
    /// were never copied up.
    pub fn mirrors_fetch(&self, fetched: &[Entry]) -> bool {
        match self {
            ConsistencyPolicy::EventualRemoteAuthoritative => !fetched.is_empty(),
        }
    }

    /// Whether the cache is written after a mutation, given the remote result.
    pub fn applies_locally(&self, _remote_applied: bool) -> bool {
        match self {
            ConsistencyPolicy::EventualRemoteAuthoritative => true,
        }
    }
}

/// Adds a newly created entry to the cached collection.
///
/// An entry already cached under the same id is replaced so ids stay unique.
pub fn append_entry(entries: &mut Vec<Entry>, entry: Entry) {
    entries.retain(|e| e.id != entry.id);
    entries.push(entry);
}

/// Merges fields into the cached entry with this id.
///
/// Returns false, leaving the collection untouched, if no entry matches.
pub fn merge_update(entries: &mut [Entry], id: EntryId, fields: &UpdateEntryRequest) -> bool {
    match entries.iter_mut().find(|e| e.id == id) {
        Some(entry) => {
            fields.apply_to(entry);
            true
        }
        None => false,
    }
}

/// Removes every cached entry with this id. Returns true if any was removed.
pub fn remove_entry(entries: &mut Vec<Entry>, id: EntryId) -> bool {
    let before = entries.len();
    entries.retain(|e| e.id != id);
    entries.len() != before
}

/// Cached entries the remote store does not have yet.
pub fn entries_missing_remotely(local: &[Entry], remote_ids: &[EntryId]) -> Vec<Entry> {
    let known: HashSet<EntryId> = remote_ids.iter().copied().collect();
    local
        .iter()
        .filter(|e| !known.contains(&e.id))
        .cloned()
        .collect()
}
