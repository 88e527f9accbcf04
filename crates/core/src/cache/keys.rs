/// Slot holding the JSON array of every known entry.
pub const ENTRIES_KEY: &str = "bookEntries";

/// Returns true if a key is safe to use as a slot name on any backend.
///
/// Keys end up as file names, so they are limited to ASCII letters,
/// digits, `-` and `_`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_key_is_valid() {
        assert!(is_valid_key(ENTRIES_KEY));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../secrets"));
        assert!(!is_valid_key("a/b"));
        assert!(!is_valid_key("with space"));
    }
}
