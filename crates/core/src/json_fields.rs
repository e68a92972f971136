//! Flattening of the free-form JSON columns on tools into display entries.
//!
//! `data_types` and `security_measures` may hold an array, an object or a
//! scalar; `sources` is a flat string map; `social_proof` is a small record
//! with `custom`, `users` or `organizations`.

use serde::Serialize;
use serde_json::{Map, Value};

/// A labelled value ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonEntry {
    pub key: String,
    pub value: String,
}

/// A labelled source link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLink {
    pub label: String,
    pub url: String,
}

/// Source keys with fixed labels, in display order.
pub const KNOWN_SOURCES: [(&str, &str); 3] = [
    ("privacy_policy", "Privacy policy"),
    ("dpa", "Data processing agreement"),
    ("security", "Security documentation"),
];

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Flatten a JSON column into entries. Entries whose value renders empty are dropped.
pub fn extract_entries(value: Option<&Value>) -> Vec<JsonEntry> {
    let Some(value) = value.filter(|v| !is_falsy(v)) else {
        return Vec::new();
    };

    let entry = |key: String, item: &Value| {
        let formatted = format_json_value(item);
        (!formatted.is_empty()).then_some(JsonEntry {
            key,
            value: formatted,
        })
    };

    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| entry(format!("Entry {}", index + 1), item))
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, item)| entry(humanize_key(key), item))
            .collect(),
        scalar => entry("Info".to_string(), scalar).into_iter().collect(),
    }
}

/// Render any JSON value as a single line.
///
/// Arrays are joined with `", "`, objects as `"Key: value"` pairs joined
/// with `"; "`, booleans as `Yes`/`No`, null as the empty string.
pub fn format_json_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(format_json_value)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(key, item)| format!("{}: {}", humanize_key(key), format_json_value(item)))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// `"data_retention-policy"` -> `"Data retention policy"`. Blank keys become `"Info"`.
pub fn humanize_key(key: &str) -> String {
    let cleaned = key
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = cleaned.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Info".to_string(),
    }
}

/// Known sources first in fixed order, then custom keys with humanised labels.
/// Non-string and blank values are skipped.
pub fn normalize_sources(value: Option<&Value>) -> Vec<SourceLink> {
    let Some(Value::Object(record)) = value else {
        return Vec::new();
    };

    let url_of = |key: &str| {
        record
            .get(key)
            .and_then(Value::as_str)
            .filter(|url| !url.trim().is_empty())
    };

    let known = KNOWN_SOURCES.iter().filter_map(|(key, label)| {
        url_of(*key).map(|url| SourceLink {
            label: label.to_string(),
            url: url.to_string(),
        })
    });

    let custom = record
        .keys()
        .filter(|key| !KNOWN_SOURCES.iter().any(|(known, _)| *known == key.as_str()))
        .filter_map(|key| {
            url_of(key).map(|url| SourceLink {
                label: humanize_key(key),
                url: url.to_string(),
            })
        });

    known.chain(custom).collect()
}

/// One-line social proof: `custom` wins, then `users`, then `organizations`.
pub fn format_social_proof(value: Option<&Value>) -> Option<String> {
    let record: &Map<String, Value> = value?.as_object()?;

    if let Some(custom) = record
        .get("custom")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        return Some(custom.to_string());
    }

    if let Some(users) = record.get("users").and_then(Value::as_f64) {
        return Some(format!("{}+ users", group_thousands(users)));
    }

    if let Some(organizations) = record.get("organizations").and_then(Value::as_f64) {
        return Some(format!("{}+ teams", group_thousands(organizations)));
    }

    None
}

/// Format with `,` thousands separators and at most three fraction digits.
pub fn group_thousands(number: f64) -> String {
    let rounded = (number.abs() * 1000.0).round() / 1000.0;
    let whole = rounded.trunc() as u64;
    let fraction = format!("{:.3}", rounded.fract());
    let fraction = fraction.trim_start_matches('0').trim_end_matches('0');

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if number < 0.0 && rounded != 0.0 { "-" } else { "" };
    let fraction = if fraction == "." { "" } else { fraction };
    format!("{sign}{grouped}{fraction}")
}
