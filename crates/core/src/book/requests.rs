use std::collections::BTreeSet;

use serde::{Serialize, Serializer};

use super::types::{Entry, EntryId, Genre, TimeScaleDot};

/// The fields a user fills in when adding or editing a book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateEntryRequest {
    pub title: String,
    pub author: String,
    pub publication_year: Option<String>,
    pub year_read: Option<String>,
    pub genres: BTreeSet<Genre>,
    pub favorite: bool,
    pub thoughts: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub time_scale_dot: Option<TimeScaleDot>,
}

impl CreateEntryRequest {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genres.insert(genre);
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn with_thoughts(mut self, thoughts: impl Into<String>) -> Self {
        self.thoughts = Some(thoughts.into());
        self
    }

    pub fn with_coordinates(
        mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        self.latitude = Some(latitude.into());
        self.longitude = Some(longitude.into());
        self
    }

    pub fn with_time_scale_dot(mut self, dot: TimeScaleDot) -> Self {
        self.time_scale_dot = Some(dot);
        self
    }

    /// Builds the entry under the given id. Text is trimmed and blank
    /// optional fields become absent.
    pub fn into_entry(self, id: EntryId) -> Entry {
        Entry {
            id,
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            publication_year: non_blank(self.publication_year),
            year_read: non_blank(self.year_read),
            genres: self.genres,
            favorite: self.favorite,
            thoughts: non_blank(self.thoughts),
            latitude: non_blank(self.latitude),
            longitude: non_blank(self.longitude),
            time_scale_dot: self.time_scale_dot,
        }
    }

    /// A full replace of every field except the id, as an edit submits it.
    pub fn into_update(self) -> UpdateEntryRequest {
        UpdateEntryRequest {
            title: Some(self.title.trim().to_string()),
            author: Some(self.author.trim().to_string()),
            publication_year: Some(non_blank(self.publication_year)),
            year_read: Some(non_blank(self.year_read)),
            genres: Some(self.genres),
            favorite: Some(self.favorite),
            thoughts: Some(non_blank(self.thoughts)),
            latitude: Some(non_blank(self.latitude)),
            longitude: Some(non_blank(self.longitude)),
            time_scale_dot: Some(self.time_scale_dot),
        }
    }
}

/// A partial field replace.
///
/// `None` leaves a field alone. For optional fields `Some(None)` clears
/// the field, and is sent to the remote as an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_read: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<BTreeSet<Genre>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_favorite"
    )]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thoughts: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_scale_dot: Option<Option<TimeScaleDot>>,
}

impl UpdateEntryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = Some(favorite);
        self
    }

    pub fn with_thoughts(mut self, thoughts: Option<String>) -> Self {
        self.thoughts = Some(non_blank(thoughts));
        self
    }

    pub fn with_time_scale_dot(mut self, dot: Option<TimeScaleDot>) -> Self {
        self.time_scale_dot = Some(dot);
        self
    }

    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the provided fields into an existing entry. The id is never touched.
    pub fn apply_to(&self, entry: &mut Entry) {
        if let Some(title) = &self.title {
            entry.title = title.clone();
        }
        if let Some(author) = &self.author {
            entry.author = author.clone();
        }
        if let Some(year) = &self.publication_year {
            entry.publication_year = year.clone();
        }
        if let Some(year) = &self.year_read {
            entry.year_read = year.clone();
        }
        if let Some(genres) = &self.genres {
            entry.genres = genres.clone();
        }
        if let Some(favorite) = self.favorite {
            entry.favorite = favorite;
        }
        if let Some(thoughts) = &self.thoughts {
            entry.thoughts = thoughts.clone();
        }
        if let Some(latitude) = &self.latitude {
            entry.latitude = latitude.clone();
        }
        if let Some(longitude) = &self.longitude {
            entry.longitude = longitude.clone();
        }
        if let Some(dot) = self.time_scale_dot {
            entry.time_scale_dot = dot;
        }
    }
}

fn serialize_optional_favorite<S>(favorite: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match favorite {
        Some(f) => crate::serde::serialize_favorite(f, serializer),
        None => serializer.serialize_none(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
