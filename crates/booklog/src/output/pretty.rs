//! Pretty output formatting.

use chrono::DateTime;

use booklog_core::book::{Entry, GenreCount, MarkerStyle, TimeScalePoint};
use booklog_core::sync::{MigrationOutcome, ReadSource, SyncOutcome};

use crate::library::{Listing, MapView};

const RULE_WIDTH: usize = 40;

/// Format an entry for display.
pub fn format_entry(entry: &Entry) -> String {
    let star = if entry.favorite { " ★" } else { "" };
    let mut output = format!("{}{}\n  by {}\n  ID: {}", entry.title, star, entry.author, entry.id);
    if let Some(added) = DateTime::from_timestamp_millis(entry.id.get()) {
        output.push_str(&format!("\n  Added: {}", added.format("%Y-%m-%d")));
    }
    if let Some(year) = &entry.publication_year {
        output.push_str(&format!("\n  Published: {}", year));
    }
    if let Some(year) = &entry.year_read {
        output.push_str(&format!("\n  Read: {}", year));
    }
    if !entry.genres.is_empty() {
        let genres: Vec<_> = entry.genres.iter().map(|g| g.name()).collect();
        output.push_str(&format!("\n  Genres: {}", genres.join(", ")));
    }
    if let (Some(lat), Some(lng)) = (&entry.latitude, &entry.longitude) {
        output.push_str(&format!("\n  Location: {}, {}", lat, lng));
    }
    if let Some(thoughts) = &entry.thoughts {
        output.push_str(&format!("\n  Thoughts: {}", thoughts));
    }
    output
}

/// Format a sorted list with its A–Z sidebar.
pub fn format_listing(heading: &str, listing: &Listing) -> String {
    if listing.entries.is_empty() {
        return "No books found.".to_string();
    }

    let letters: Vec<String> = listing
        .index
        .iter()
        .map(|l| {
            if l.is_available() {
                l.letter.to_string()
            } else {
                "·".to_string()
            }
        })
        .collect();

    let mut output = format!("{} ({})", heading, listing.entries.len());
    if listing.source == ReadSource::Cache {
        output.push_str(" [offline copy]");
    }
    output.push_str(&format!("\n{}\n", letters.join(" ")));
    output.push_str(&"-".repeat(RULE_WIDTH));
    for entry in &listing.entries {
        output.push_str(&format!("\n{}", format_entry(entry)));
        output.push('\n');
    }
    output
}

/// Format the genre chart as horizontal bars.
pub fn format_genre_chart(chart: &[GenreCount]) -> String {
    if chart.is_empty() {
        return "No genres recorded.".to_string();
    }
    let width = chart.iter().map(|c| c.genre.name().len()).max().unwrap_or(0);
    chart
        .iter()
        .map(|c| format!("{:<width$}  {} {}", c.genre.name(), "█".repeat(c.count), c.count))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_map(map: &MapView) -> String {
    if map.markers.is_empty() {
        return "No books have a location.".to_string();
    }
    let mut output = format!("MARKERS ({})\n", map.markers.len());
    output.push_str(&"-".repeat(RULE_WIDTH));
    for m in &map.markers {
        let pin = match m.style {
            MarkerStyle::Star => '★',
            MarkerStyle::Circle => '●',
        };
        output.push_str(&format!(
            "\n{} {} ({:.4}, {:.4}) - {}",
            pin, m.title, m.latitude, m.longitude, m.author
        ));
    }
    if let Some(b) = &map.bounds {
        output.push_str(&format!(
            "\nBounds: S {:.4} W {:.4} N {:.4} E {:.4}",
            b.south, b.west, b.north, b.east
        ));
    }
    output
}

pub fn format_time_scale(points: &[TimeScalePoint]) -> String {
    if points.is_empty() {
        return "No books found.".to_string();
    }
    points
        .iter()
        .map(|p| format!("({:.1}, {:.1}) {}", p.x, p.y, p.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Describes where a write landed.
pub fn format_outcome(action: &str, outcome: &SyncOutcome) -> String {
    match (outcome.remote_applied, outcome.cache_changed) {
        (true, _) => format!("{action}."),
        (false, true) => format!("{action} locally; the remote was not updated."),
        (false, false) => format!("{action}: nothing changed."),
    }
}

pub fn format_migration(outcome: &MigrationOutcome) -> String {
    match outcome {
        MigrationOutcome::NothingLocal => "No local entries to migrate.".to_string(),
        MigrationOutcome::UpToDate => "Remote already has every local entry.".to_string(),
        MigrationOutcome::Inserted(n) => format!("Migrated {n} entries to the remote."),
        MigrationOutcome::Aborted => "Migration did not complete; see the log.".to_string(),
    }
}
