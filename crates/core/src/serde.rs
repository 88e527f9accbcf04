//! Serde helpers for the entry wire format.
//!
//! Entries come from two places with slightly different habits: form-like
//! payloads where blank strings stand in for "no value", and older records
//! where `favorite` is the string `"yes"` rather than a boolean.

use std::collections::BTreeSet;

use serde::{de, Deserialize, Deserializer, Serializer};

use crate::book::Genre;

/// Deserialize an optional string, treating blank strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional free-form year.
///
/// Years are stored as text but older records hold plain numbers.
pub fn deserialize_optional_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    match Option::<Year>::deserialize(deserializer)? {
        Some(Year::Text(s)) if !s.trim().is_empty() => Ok(Some(s)),
        Some(Year::Number(n)) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}

/// Deserialize a set of genre tags.
///
/// Tags outside the known list, and values that are not strings, are
/// dropped so one odd tag cannot make a whole record unreadable. Null
/// reads as no genres.
pub fn deserialize_genres<'de, D>(deserializer: D) -> Result<BTreeSet<Genre>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(tags
        .into_iter()
        .flatten()
        .filter_map(|tag| tag.as_str().and_then(|name| name.parse::<Genre>().ok()))
        .collect())
}

/// Serialize a favorite flag as `"yes"` / `"no"`.
pub fn serialize_favorite<S>(favorite: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *favorite { "yes" } else { "no" })
}

/// Deserialize a favorite flag.
///
/// `"yes"` (any case) and `true` are favorites; every other value,
/// including null, is not.
pub fn deserialize_favorite<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FavoriteVisitor;

    impl<'de> de::Visitor<'de> for FavoriteVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a favorite flag")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            Ok(v.trim().eq_ignore_ascii_case("yes"))
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<bool, D::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(FavoriteVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_year")]
        year_field: Option<String>,
        #[serde(
            default,
            serialize_with = "serialize_favorite",
            deserialize_with = "deserialize_favorite"
        )]
        favorite: bool,
    }

    #[test]
    fn test_deserialize_optional_string_blank() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "hello"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("hello".to_string()));
    }

    #[test]
    fn test_deserialize_optional_year_number() {
        let json = r#"{"year_field": 1954}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.year_field, Some("1954".to_string()));
    }

    #[test]
    fn test_deserialize_optional_year_text_and_blank() {
        let result: TestStruct = serde_json::from_str(r#"{"year_field": "c. 1600"}"#).unwrap();
        assert_eq!(result.year_field, Some("c. 1600".to_string()));

        let result: TestStruct = serde_json::from_str(r#"{"year_field": ""}"#).unwrap();
        assert_eq!(result.year_field, None);
    }

    #[test]
    fn test_favorite_yes_variants() {
        for json in [
            r#"{"favorite": "yes"}"#,
            r#"{"favorite": "YES"}"#,
            r#"{"favorite": true}"#,
        ] {
            let result: TestStruct = serde_json::from_str(json).unwrap();
            assert!(result.favorite, "{json} should be a favorite");
        }
    }

    #[test]
    fn test_favorite_other_values() {
        for json in [
            r#"{"favorite": "no"}"#,
            r#"{"favorite": ""}"#,
            r#"{"favorite": null}"#,
            r#"{"favorite": false}"#,
            r#"{"favorite": 1}"#,
            r#"{}"#,
        ] {
            let result: TestStruct = serde_json::from_str(json).unwrap();
            assert!(!result.favorite, "{json} should not be a favorite");
        }
    }

    #[test]
    fn test_favorite_serializes_as_yes_no() {
        let value = TestStruct {
            string_field: None,
            year_field: None,
            favorite: true,
        };
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["favorite"], "yes");
    }
}
