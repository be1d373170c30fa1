//! Lenient field access for API payloads.
//!
//! The API omits fields freely and mixes numeric and string identifiers, so
//! every accessor falls back to an empty value instead of failing.

use serde_json::Value;

/// A scalar field as a string: strings as-is, numbers and bools formatted,
/// anything else empty.
pub fn str_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// First non-empty of several string fields
pub fn first_str_field(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| str_field(value, k))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// `Description` of the first entry of a localized list such as
/// `[{"Locale": "en-GB", "Description": "Group A"}]`
pub fn localized(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_array)
        .and_then(|entries| entries.first())
        .map(|entry| str_field(entry, "Description"))
        .unwrap_or_default()
}

/// Array field, or an empty slice when missing or null
pub fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
