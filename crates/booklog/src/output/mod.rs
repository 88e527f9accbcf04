//! Rendering of command results.
//!
//! JSON output uses the same wire format as the cache and the remote
//! table; `pretty` holds the human-readable renderers.

pub mod pretty;

/// Renders a result as a single line of JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklog_core::book::{Entry, EntryId};

    #[test]
    fn test_entries_use_wire_format() {
        let entry = Entry::new(EntryId(7), "Emma", "Jane Austen").with_favorite(true);

        let json: serde_json::Value = serde_json::from_str(&format_json(&vec![entry])).unwrap();

        assert_eq!(json[0]["id"], 7);
        assert_eq!(json[0]["favorite"], "yes");
    }
}
