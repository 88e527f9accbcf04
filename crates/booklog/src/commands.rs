//! Runs one CLI command against a `Library`.

use serde_json::json;

use booklog_core::book::{EntryId, SortKey};
use booklog_core::cache::Cache;
use booklog_core::storage::RemoteEntryStore;
use booklog_core::sync::SyncOutcome;

use crate::cli::{Commands, OutputFormat};
use crate::library::{Library, LibraryError, ListView};
use crate::output::{format_json, pretty};

/// Executes `command` and returns the text to print, if any.
///
/// A missing id on `edit` or `delete` is acknowledged, not raised, so
/// the only error that comes back is an invalid form.
pub async fn execute<R, C>(
    library: &mut Library<R, C>,
    command: Commands,
    format: OutputFormat,
    quiet: bool,
) -> Result<Option<String>, LibraryError>
where
    R: RemoteEntryStore + ?Sized,
    C: Cache + ?Sized,
{
    let text = match command {
        Commands::List { sort } => {
            library.set_sort(ListView::All, SortKey::from(sort));
            let listing = library.all_entries().await;
            match format {
                OutputFormat::Json => format_json(&listing),
                OutputFormat::Pretty => pretty::format_listing("BOOKS", &listing),
            }
        }
        Commands::Favorites { sort } => {
            library.set_sort(ListView::Favorites, SortKey::from(sort));
            let listing = library.favorites().await;
            match format {
                OutputFormat::Json => format_json(&listing),
                OutputFormat::Pretty => pretty::format_listing("FAVORITES", &listing),
            }
        }
        Commands::Add(fields) => {
            let created = library
                .submit_new(fields.into_request()?)
                .await?;
            match format {
                OutputFormat::Json => format_json(&created),
                OutputFormat::Pretty => format!(
                    "{}\n{}",
                    pretty::format_outcome("Added", &created.outcome),
                    pretty::format_entry(&created.entry)
                ),
            }
        }
        Commands::Edit { id, fields } => {
            let result = library.submit_edit(id, fields.into_request()?).await;
            return acknowledge("Updated", id, result, format, quiet);
        }
        Commands::Delete { id } => {
            let result = library.confirm_delete(id).await;
            return acknowledge("Deleted", id, result, format, quiet);
        }
        Commands::Genres => {
            let chart = library.genre_chart().await;
            match format {
                OutputFormat::Json => format_json(&chart),
                OutputFormat::Pretty => pretty::format_genre_chart(&chart),
            }
        }
        Commands::Map => {
            let map = library.map().await;
            match format {
                OutputFormat::Json => format_json(&map),
                OutputFormat::Pretty => pretty::format_map(&map),
            }
        }
        Commands::TimeScale { width, height } => {
            let points = library.time_scale(width, height).await;
            match format {
                OutputFormat::Json => format_json(&points),
                OutputFormat::Pretty => pretty::format_time_scale(&points),
            }
        }
        Commands::Autofill { author } => {
            let found = library.autofill_coordinates(&author).await;
            match (format, found) {
                (OutputFormat::Json, Some((latitude, longitude))) => {
                    format_json(&json!({ "latitude": latitude, "longitude": longitude }))
                }
                (OutputFormat::Json, None) => format_json(&json!(null)),
                (OutputFormat::Pretty, Some((latitude, longitude))) => {
                    format!("{latitude}, {longitude}")
                }
                (OutputFormat::Pretty, None) => format!("No location recorded for {author}."),
            }
        }
        Commands::Migrate => {
            let outcome = library.migrate().await;
            if quiet && format == OutputFormat::Pretty {
                return Ok(None);
            }
            match format {
                OutputFormat::Json => format_json(&outcome),
                OutputFormat::Pretty => pretty::format_migration(&outcome),
            }
        }
    };

    Ok(Some(text))
}

fn acknowledge(
    action: &str,
    id: EntryId,
    result: Result<SyncOutcome, LibraryError>,
    format: OutputFormat,
    quiet: bool,
) -> Result<Option<String>, LibraryError> {
    let text = match (result, format) {
        (Err(err @ LibraryError::Invalid(_)), _) => return Err(err),
        (Ok(outcome), OutputFormat::Json) => {
            format_json(&json!({ "id": id, "found": true, "outcome": outcome }))
        }
        (Err(LibraryError::NotFound(_)), OutputFormat::Json) => {
            format_json(&json!({ "id": id, "found": false }))
        }
        (_, OutputFormat::Pretty) if quiet => return Ok(None),
        (Ok(outcome), OutputFormat::Pretty) => {
            pretty::format_outcome(&format!("{action} {id}"), &outcome)
        }
        (Err(LibraryError::NotFound(_)), OutputFormat::Pretty) => {
            format!("No entry with id {id}; nothing to do.")
        }
    };
    Ok(Some(text))
}
