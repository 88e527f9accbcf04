mod error;
mod operations;
mod requests;
mod sorting;
mod types;
mod views;

pub use error::EntryError;
pub use operations::{coordinates_for_author, filter_favorites, find_entry, validate_entry};
pub use requests::{CreateEntryRequest, UpdateEntryRequest};
pub use sorting::{
    alphabet_index, index_letter, sort_entries, sorted_entries, AlphabetLetter, SortKey,
};
pub use types::{Entry, EntryId, Genre, TimeScaleDot};
pub use views::{
    genre_counts, map_bounds, map_markers, time_scale_points, GenreCount, MapBounds, MapMarker,
    MarkerStyle, TimeScalePoint, MAP_BOUNDS_PADDING,
};
