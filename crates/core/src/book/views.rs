//! Data behind the genre chart, the world map and the time scale.
//!
//! The widgets themselves are someone else's problem; these functions
//! only decide what they are handed.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{Entry, EntryId, Genre};

/// One bar of the genre chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: Genre,
    pub count: usize,
}

/// Counts books per genre, most common first.
///
/// Genres nobody has read are left out. Ties keep the enumeration order.
pub fn genre_counts(entries: &[Entry]) -> Vec<GenreCount> {
    let mut counts: BTreeMap<Genre, usize> = BTreeMap::new();
    for genre in entries.iter().flat_map(|e| e.genres.iter()) {
        *counts.entry(*genre).or_default() += 1;
    }

    let mut chart: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, count)| GenreCount { genre, count })
        .collect();
    chart.sort_by(|a, b| b.count.cmp(&a.count));
    chart
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    Star,
    Circle,
}

/// A pin on the world map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub entry_id: EntryId,
    pub title: String,
    pub author: String,
    pub latitude: f64,
    pub longitude: f64,
    pub style: MarkerStyle,
}

/// Builds one marker per entry with usable coordinates.
pub fn map_markers(entries: &[Entry]) -> Vec<MapMarker> {
    entries
        .iter()
        .filter_map(|e| {
            let (latitude, longitude) = e.coordinates()?;
            Some(MapMarker {
                entry_id: e.id,
                title: e.title.clone(),
                author: e.author.clone(),
                latitude,
                longitude,
                style: if e.favorite {
                    MarkerStyle::Star
                } else {
                    MarkerStyle::Circle
                },
            })
        })
        .collect()
}

/// The box the map zooms to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Fraction of each span added on every side of the marker box.
pub const MAP_BOUNDS_PADDING: f64 = 0.1;

/// Bounding box over all markers, padded so edge pins are not clipped.
pub fn map_bounds(markers: &[MapMarker]) -> Option<MapBounds> {
    let first = markers.first()?;
    let mut bounds = MapBounds {
        south: first.latitude,
        west: first.longitude,
        north: first.latitude,
        east: first.longitude,
    };
    for m in &markers[1..] {
        bounds.south = bounds.south.min(m.latitude);
        bounds.north = bounds.north.max(m.latitude);
        bounds.west = bounds.west.min(m.longitude);
        bounds.east = bounds.east.max(m.longitude);
    }

    let lat_pad = (bounds.north - bounds.south) * MAP_BOUNDS_PADDING;
    let lng_pad = (bounds.east - bounds.west) * MAP_BOUNDS_PADDING;
    Some(MapBounds {
        south: bounds.south - lat_pad,
        west: bounds.west - lng_pad,
        north: bounds.north + lat_pad,
        east: bounds.east + lng_pad,
    })
}

/// A book plotted on the time scale image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeScalePoint {
    pub entry_id: EntryId,
    pub title: String,
    pub author: String,
    pub favorite: bool,
    pub x: f64,
    pub y: f64,
}

/// Projects every entry onto an image of the given pixel size.
///
/// Entries without a dot sit in the center.
pub fn time_scale_points(entries: &[Entry], width: f64, height: f64) -> Vec<TimeScalePoint> {
    entries
        .iter()
        .map(|e| {
            let (x, y) = e.dot_or_center().to_pixel(width, height);
            TimeScalePoint {
                entry_id: e.id,
                title: e.title.clone(),
                author: e.author.clone(),
                favorite: e.favorite,
                x,
                y,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::types::TimeScaleDot;

    fn entry(id: i64, title: &str) -> Entry {
        Entry::new(EntryId(id), title, "Some Author")
    }

    #[test]
    fn test_genre_counts_orders_by_count_then_enum() {
        let entries = vec![
            entry(1, "A").with_genre(Genre::Fantasy),
            entry(2, "B")
                .with_genre(Genre::Fantasy)
                .with_genre(Genre::Classic),
            entry(3, "C").with_genre(Genre::Fiction),
        ];

        let chart = genre_counts(&entries);

        assert_eq!(
            chart,
            vec![
                GenreCount { genre: Genre::Fantasy, count: 2 },
                GenreCount { genre: Genre::Fiction, count: 1 },
                GenreCount { genre: Genre::Classic, count: 1 },
            ]
        );
    }

    #[test]
    fn test_genre_counts_empty() {
        assert!(genre_counts(&[entry(1, "A")]).is_empty());
    }

    #[test]
    fn test_map_markers_skip_unplaced_entries() {
        let entries = vec![
            entry(1, "Placed").with_coordinates("10", "20").with_favorite(true),
            entry(2, "Nowhere"),
            entry(3, "Broken").with_coordinates("x", "20"),
            entry(4, "Plain").with_coordinates("-5.5", "3"),
        ];

        let markers = map_markers(&entries);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].style, MarkerStyle::Star);
        assert_eq!(markers[1].style, MarkerStyle::Circle);
        assert_eq!((markers[1].latitude, markers[1].longitude), (-5.5, 3.0));
    }

    #[test]
    fn test_map_bounds_padding() {
        let markers = map_markers(&[
            entry(1, "A").with_coordinates("0", "0"),
            entry(2, "B").with_coordinates("10", "20"),
        ]);

        let bounds = map_bounds(&markers).unwrap();

        assert_eq!(
            bounds,
            MapBounds {
                south: -1.0,
                west: -2.0,
                north: 11.0,
                east: 22.0
            }
        );
        assert_eq!(map_bounds(&[]), None);
    }

    #[test]
    fn test_time_scale_points_reproduce_pixels() {
        let entries = vec![
            entry(1, "Placed").with_time_scale_dot(TimeScaleDot::new(0.1, 0.9).unwrap()),
            entry(2, "Centered"),
        ];

        let points = time_scale_points(&entries, 1000.0, 500.0);

        assert!((points[0].x - 100.0).abs() < 1e-9);
        assert!((points[0].y - 450.0).abs() < 1e-9);
        assert_eq!((points[1].x, points[1].y), (500.0, 250.0));
    }
}
