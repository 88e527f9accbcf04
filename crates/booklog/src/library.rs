//! The `Library` controller.
//!
//! Owns the UI state that outlives a single command (the sort key of each
//! list and the draft time scale dot) and turns form submissions into sync
//! layer calls.

use serde::Serialize;
use thiserror::Error;

use booklog_core::book::{
    alphabet_index, coordinates_for_author, filter_favorites, find_entry, genre_counts,
    map_bounds, map_markers, sorted_entries, time_scale_points, validate_entry, AlphabetLetter,
    CreateEntryRequest, Entry, EntryError, EntryId, GenreCount, MapBounds, MapMarker, SortKey,
    TimeScaleDot, TimeScalePoint,
};
use booklog_core::cache::Cache;
use booklog_core::storage::RemoteEntryStore;
use booklog_core::sync::{MigrationOutcome, ReadSource, SyncOutcome};

use crate::sync::SyncedEntryStore;

/// Errors surfaced to the person using the library.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LibraryError {
    #[error("No entry with id {0}")]
    NotFound(EntryId),
    #[error(transparent)]
    Invalid(#[from] EntryError),
}

/// Which of the two lists a sort key applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    All,
    Favorites,
}

/// A sorted list with its A–Z sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub sort: SortKey,
    pub source: ReadSource,
    pub entries: Vec<Entry>,
    pub index: Vec<AlphabetLetter>,
}

/// Everything the map needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub markers: Vec<MapMarker>,
    pub bounds: Option<MapBounds>,
}

/// A created entry and what the sync layer did with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Created {
    pub entry: Entry,
    pub outcome: SyncOutcome,
}

pub struct Library<R: ?Sized, C: ?Sized> {
    store: SyncedEntryStore<R, C>,
    all_sort: SortKey,
    favorites_sort: SortKey,
    draft_dot: TimeScaleDot,
    last_id: Option<EntryId>,
}

impl<R, C> Library<R, C>
where
    R: RemoteEntryStore + ?Sized,
    C: Cache + ?Sized,
{
    pub fn new(store: SyncedEntryStore<R, C>) -> Self {
        Self {
            store,
            all_sort: SortKey::default(),
            favorites_sort: SortKey::default(),
            draft_dot: TimeScaleDot::center(),
            last_id: None,
        }
    }

    pub fn sort(&self, view: ListView) -> SortKey {
        match view {
            ListView::All => self.all_sort,
            ListView::Favorites => self.favorites_sort,
        }
    }

    pub fn set_sort(&mut self, view: ListView, key: SortKey) {
        match view {
            ListView::All => self.all_sort = key,
            ListView::Favorites => self.favorites_sort = key,
        }
    }

    pub fn draft_dot(&self) -> TimeScaleDot {
        self.draft_dot
    }

    /// Moves the draft dot to where the time scale image was clicked.
    pub fn move_dot(&mut self, px: f64, py: f64, width: f64, height: f64) -> TimeScaleDot {
        self.draft_dot = TimeScaleDot::from_pixel(px, py, width, height);
        self.draft_dot
    }

    pub fn reset_dot(&mut self) {
        self.draft_dot = TimeScaleDot::center();
    }

    pub async fn migrate(&self) -> MigrationOutcome {
        self.store.migrate_local_to_remote().await
    }

    pub async fn all_entries(&self) -> Listing {
        let (entries, source) = self.store.read_all().await;
        listing(entries, self.all_sort, source)
    }

    pub async fn favorites(&self) -> Listing {
        let (entries, source) = self.store.read_all().await;
        listing(filter_favorites(&entries), self.favorites_sort, source)
    }

    /// Validates and stores a new entry.
    ///
    /// The entry gets a fresh timestamp id and, unless the form picked
    /// one, the draft dot. The draft dot is reset afterwards.
    pub async fn submit_new(&mut self, form: CreateEntryRequest) -> Result<Created, LibraryError> {
        let id = self.next_id();
        let mut entry = form.into_entry(id);
        if entry.time_scale_dot.is_none() {
            entry.time_scale_dot = Some(self.draft_dot);
        }
        validate_entry(&entry)?;

        let outcome = self.store.create(&entry).await;
        self.reset_dot();
        tracing::info!(entry_id = %id, remote = outcome.remote_applied, "Entry created");

        Ok(Created { entry, outcome })
    }

    /// Replaces every field of an existing entry.
    ///
    /// A form without a dot keeps the entry's current one.
    pub async fn submit_edit(
        &mut self,
        id: EntryId,
        mut form: CreateEntryRequest,
    ) -> Result<SyncOutcome, LibraryError> {
        let (entries, _) = self.store.read_all().await;
        let existing = find_entry(&entries, id).ok_or(LibraryError::NotFound(id))?;
        if form.time_scale_dot.is_none() {
            form.time_scale_dot = existing.time_scale_dot;
        }
        validate_entry(&form.clone().into_entry(id))?;

        let outcome = self.store.update(id, &form.into_update()).await;
        tracing::info!(entry_id = %id, remote = outcome.remote_applied, "Entry updated");
        Ok(outcome)
    }

    pub async fn confirm_delete(&mut self, id: EntryId) -> Result<SyncOutcome, LibraryError> {
        let (entries, _) = self.store.read_all().await;
        if find_entry(&entries, id).is_none() {
            return Err(LibraryError::NotFound(id));
        }

        let outcome = self.store.delete(id).await;
        tracing::info!(entry_id = %id, remote = outcome.remote_applied, "Entry deleted");
        Ok(outcome)
    }

    pub async fn genre_chart(&self) -> Vec<GenreCount> {
        let (entries, _) = self.store.read_all().await;
        genre_counts(&entries)
    }

    pub async fn map(&self) -> MapView {
        let (entries, _) = self.store.read_all().await;
        let markers = map_markers(&entries);
        let bounds = map_bounds(&markers);
        MapView { markers, bounds }
    }

    pub async fn time_scale(&self, width: f64, height: f64) -> Vec<TimeScalePoint> {
        let (entries, _) = self.store.read_all().await;
        time_scale_points(&entries, width, height)
    }

    /// Coordinates already recorded for this author, if any.
    pub async fn autofill_coordinates(&self, author: &str) -> Option<(String, String)> {
        let (entries, _) = self.store.read_all().await;
        coordinates_for_author(&entries, author)
    }

    /// Timestamp id, bumped past the previous one when two land in the
    /// same millisecond.
    fn next_id(&mut self) -> EntryId {
        let now = EntryId::now();
        let id = match self.last_id {
            Some(last) if now <= last => EntryId(last.get() + 1),
            _ => now,
        };
        self.last_id = Some(id);
        id
    }
}

fn listing(entries: Vec<Entry>, sort: SortKey, source: ReadSource) -> Listing {
    let entries = sorted_entries(&entries, sort);
    let index = alphabet_index(&entries, sort);
    Listing {
        sort,
        source,
        entries,
        index,
    }
}
