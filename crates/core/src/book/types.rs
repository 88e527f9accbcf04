use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::EntryError;
use crate::serde::{
    deserialize_favorite, deserialize_genres, deserialize_optional_string,
    deserialize_optional_year, serialize_favorite,
};

/// Identifier of a book entry.
///
/// Assigned once at creation from the creation timestamp in milliseconds
/// and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl EntryId {
    /// Derives an id from a timestamp.
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    /// Derives an id from the current time.
    pub fn now() -> Self {
        Self::from_timestamp(Utc::now())
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// The fixed list of genre tags a book can carry.
///
/// Declaration order is the display order used by the genre chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Mystery,
    Thriller,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Romance,
    Horror,
    #[serde(rename = "Historical Fiction")]
    HistoricalFiction,
    Biography,
    Memoir,
    History,
    Science,
    Philosophy,
    Poetry,
    Classic,
    #[serde(rename = "Young Adult")]
    YoungAdult,
    #[serde(rename = "Self-Help")]
    SelfHelp,
}

impl Genre {
    pub const ALL: [Genre; 18] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::Thriller,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Romance,
        Genre::Horror,
        Genre::HistoricalFiction,
        Genre::Biography,
        Genre::Memoir,
        Genre::History,
        Genre::Science,
        Genre::Philosophy,
        Genre::Poetry,
        Genre::Classic,
        Genre::YoungAdult,
        Genre::SelfHelp,
    ];

    /// Returns the display name, which is also the wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Mystery => "Mystery",
            Genre::Thriller => "Thriller",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Romance => "Romance",
            Genre::Horror => "Horror",
            Genre::HistoricalFiction => "Historical Fiction",
            Genre::Biography => "Biography",
            Genre::Memoir => "Memoir",
            Genre::History => "History",
            Genre::Science => "Science",
            Genre::Philosophy => "Philosophy",
            Genre::Poetry => "Poetry",
            Genre::Classic => "Classic",
            Genre::YoungAdult => "Young Adult",
            Genre::SelfHelp => "Self-Help",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Genre {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Genre::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EntryError::UnknownGenre(wanted.to_string()))
    }
}

/// Position of a book on the time scale reference image.
///
/// Both components are fractions of the image size, so the same dot
/// lands in the same place whatever size the image is rendered at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScaleDot {
    pub x: f64,
    pub y: f64,
}

impl TimeScaleDot {
    /// Creates a dot, rejecting components outside `[0, 1]`.
    pub fn new(x: f64, y: f64) -> Result<Self, EntryError> {
        let dot = Self { x, y };
        if dot.is_in_range() {
            Ok(dot)
        } else {
            Err(EntryError::DotOutOfRange { x, y })
        }
    }

    /// The middle of the image; used whenever no position was picked.
    pub fn center() -> Self {
        Self { x: 0.5, y: 0.5 }
    }

    pub fn is_in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// Pixel position of this dot on an image of the given size.
    pub fn to_pixel(&self, width: f64, height: f64) -> (f64, f64) {
        (self.x * width, self.y * height)
    }

    /// Converts a pixel position back into fractions, clamped to the image.
    ///
    /// A degenerate image (zero or negative size) yields the center.
    pub fn from_pixel(px: f64, py: f64, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::center();
        }
        Self {
            x: (px / width).clamp(0.0, 1.0),
            y: (py / height).clamp(0.0, 1.0),
        }
    }
}

impl Default for TimeScaleDot {
    fn default() -> Self {
        Self::center()
    }
}

/// One book in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub author: String,
    #[serde(default, deserialize_with = "deserialize_optional_year")]
    pub publication_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_year")]
    pub year_read: Option<String>,
    #[serde(default, deserialize_with = "deserialize_genres")]
    pub genres: BTreeSet<Genre>,
    #[serde(
        default,
        serialize_with = "serialize_favorite",
        deserialize_with = "deserialize_favorite"
    )]
    pub favorite: bool,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub thoughts: Option<String>,
    /// Latitude as entered; parsed on demand.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub latitude: Option<String>,
    /// Longitude as entered; parsed on demand.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub longitude: Option<String>,
    #[serde(default)]
    pub time_scale_dot: Option<TimeScaleDot>,
}

impl Entry {
    /// Creates an entry with only the required fields set.
    pub fn new(id: EntryId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            publication_year: None,
            year_read: None,
            genres: BTreeSet::new(),
            favorite: false,
            thoughts: None,
            latitude: None,
            longitude: None,
            time_scale_dot: None,
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

    /// Parsed `(latitude, longitude)`, if both are present and finite.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = parse_coordinate(self.latitude.as_deref()?)?;
        let lng = parse_coordinate(self.longitude.as_deref()?)?;
        Some((lat, lng))
    }

    /// The author's last name: the final whitespace-separated word.
    pub fn author_last_name(&self) -> &str {
        self.author.split_whitespace().last().unwrap_or("")
    }

    /// The stored dot, or the center when none was picked.
    pub fn dot_or_center(&self) -> TimeScaleDot {
        self.time_scale_dot.unwrap_or_default()
    }
}

pub(crate) fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
