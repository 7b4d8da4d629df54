//! Lenient field deserializers
//!
//! Form files and API records are written by other programs; these helpers
//! accept the loose shapes they produce instead of rejecting the whole
//! document.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null` reads as the type's default
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List whose unreadable entries are skipped; `null` reads as empty
pub fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Optional block that reads as `None` when it is `null` or unreadable
pub fn invalid_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

/// Enum choice where an empty or blank string means "nothing selected"
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Color {
        Red,
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "skip_invalid")]
        colors: Vec<Color>,
        #[serde(default, deserialize_with = "invalid_as_none")]
        first: Option<Color>,
        #[serde(default, deserialize_with = "blank_as_none")]
        picked: Option<Color>,
    }

    #[test]
    fn test_lenient_fields() {
        let h: Holder = serde_json::from_str(
            r#"{"name":null,"colors":["red","blue",3],"first":"green","picked":" "}"#,
        )
        .unwrap();
        assert_eq!(h.name, "");
        assert_eq!(h.colors, vec![Color::Red]);
        assert_eq!(h.first, None);
        assert_eq!(h.picked, None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let h: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(h.name, "");
        assert!(h.colors.is_empty());
        assert_eq!(h.picked, None);
    }

    #[test]
    fn test_blank_as_none_rejects_unknown_choice() {
        let err = serde_json::from_str::<Holder>(r#"{"picked":"purple"}"#).unwrap_err();
        assert!(err.to_string().contains("purple"), "got: {}", err);
    }

    #[test]
    fn test_blank_as_none_reads_choice() {
        let h: Holder = serde_json::from_str(r#"{"picked":"red","colors":null}"#).unwrap();
        assert_eq!(h.picked, Some(Color::Red));
        assert!(h.colors.is_empty());
    }
}
