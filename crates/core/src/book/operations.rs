use super::error::EntryError;
use super::types::{parse_coordinate, Entry, EntryId};

/// Validates an entry before it is created or an edit is submitted.
pub fn validate_entry(entry: &Entry) -> Result<(), EntryError> {
    if entry.title.trim().is_empty() {
        return Err(EntryError::EmptyTitle);
    }
    if entry.author.trim().is_empty() {
        return Err(EntryError::EmptyAuthor);
    }

    validate_coordinate("latitude", entry.latitude.as_deref(), 90.0)?;
    validate_coordinate("longitude", entry.longitude.as_deref(), 180.0)?;

    if let Some(dot) = entry.time_scale_dot {
        if !dot.is_in_range() {
            return Err(EntryError::DotOutOfRange { x: dot.x, y: dot.y });
        }
    }

    Ok(())
}

fn validate_coordinate(field: &'static str, raw: Option<&str>, limit: f64) -> Result<(), EntryError> {
    let Some(raw) = raw else {
        return Ok(());
    };
    match parse_coordinate(raw) {
        Some(v) if (-limit..=limit).contains(&v) => Ok(()),
        _ => Err(EntryError::InvalidCoordinate {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Finds an entry by id.
pub fn find_entry(entries: &[Entry], id: EntryId) -> Option<&Entry> {
    entries.iter().find(|e| e.id == id)
}

/// Filters the entries marked as favorite.
pub fn filter_favorites(entries: &[Entry]) -> Vec<Entry> {
    entries.iter().filter(|e| e.favorite).cloned().collect()
}

/// Coordinates already recorded for an author, used to pre-fill the
/// location of a new book by the same author.
///
/// Matches the trimmed author name case-insensitively and returns the raw
/// latitude/longitude strings of the first entry that has both.
pub fn coordinates_for_author(entries: &[Entry], author: &str) -> Option<(String, String)> {
    let wanted = author.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    entries
        .iter()
        .filter(|e| e.author.trim().to_lowercase() == wanted)
        .find_map(|e| match (&e.latitude, &e.longitude) {
            (Some(lat), Some(lng)) => Some((lat.clone(), lng.clone())),
            _ => None,
        })
}
