//! Deserialization helpers for loosely-typed YAML scalars.
//!
//! Recipe files are written by hand, so a field like `amount` shows up as `2`,
//! `0.5` or `"1/2"` depending on who wrote it. Everything that is only ever
//! displayed is normalised to a `String` here, and `null` is treated as if the
//! field were missing.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// Convert a scalar YAML value into its display string.
///
/// Returns `None` for `null` and for values that have no scalar form
/// (sequences, mappings, tagged values).
pub fn to_display(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

/// Display form of a list entry that was written either as plain text or as
/// `key: value` (which YAML turns into a one-entry mapping).
///
/// Multi-entry mappings keep their last entry.
pub fn to_entry_text(value: &Value) -> Option<String> {
    match value {
        Value::Mapping(map) => {
            let (key, value) = map.iter().last()?;
            Some(format!("{}: {}", to_display(key)?, to_display(value)?))
        }
        other => to_display(other),
    }
}

/// Truthiness of a YAML value, used for flag fields like `optional: yes`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(_) => true,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// A scalar that must be present and non-null.
pub fn required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    to_display(&value)
        .ok_or_else(|| D::Error::custom(format!("expected a text value, found {}", describe(&value))))
}

/// A scalar that may be missing or `null`.
pub fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    to_display(&value)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected a text value, found {}", describe(&value))))
}

/// Like [`optional`], but an empty string counts as missing too.
pub fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional(deserializer)?.filter(|s| !s.is_empty()))
}

/// A flag field, using YAML truthiness rather than strict booleans.
pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

/// A list of scalars, e.g. `notes`.
pub fn optional_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Sequence(items) => items
            .iter()
            .map(|item| {
                to_entry_text(item).ok_or_else(|| {
                    D::Error::custom(format!(
                        "expected a list of text values, found {}",
                        describe(item)
                    ))
                })
            })
            .collect::<Result<Vec<String>, D::Error>>()
            .map(Some),
        other => Err(D::Error::custom(format!(
            "expected a list, found {}",
            describe(&other)
        ))),
    }
}
