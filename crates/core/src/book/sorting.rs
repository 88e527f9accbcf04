use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::types::Entry;

/// How a list of books is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    /// By the author's last name.
    Author,
}

/// One letter of the A–Z jump sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlphabetLetter {
    pub letter: char,
    /// Position of the first entry with this letter in the sorted list.
    pub first_index: Option<usize>,
}

impl AlphabetLetter {
    pub fn is_available(&self) -> bool {
        self.first_index.is_some()
    }
}

fn sort_text(entry: &Entry, key: SortKey) -> &str {
    match key {
        SortKey::Title => entry.title.as_str(),
        SortKey::Author => entry.author_last_name(),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sorts entries in place. The sort is stable.
pub fn sort_entries(entries: &mut [Entry], key: SortKey) {
    entries.sort_by(|a, b| compare_text(sort_text(a, key), sort_text(b, key)));
}

/// Returns a sorted copy of the entries.
pub fn sorted_entries(entries: &[Entry], key: SortKey) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sort_entries(&mut sorted, key);
    sorted
}

/// The uppercase letter an entry files under, if it is A–Z.
pub fn index_letter(entry: &Entry, key: SortKey) -> Option<char> {
    sort_text(entry, key)
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .filter(char::is_ascii_uppercase)
}

/// Builds the A–Z sidebar for an already sorted list.
pub fn alphabet_index(sorted: &[Entry], key: SortKey) -> Vec<AlphabetLetter> {
    ('A'..='Z')
        .map(|letter| AlphabetLetter {
            letter,
            first_index: sorted
                .iter()
                .position(|e| index_letter(e, key) == Some(letter)),
        })
        .collect()
}
