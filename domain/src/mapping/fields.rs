//! Lenient field extraction from upstream JSON records
//!
//! Records that are not objects simply have no fields, which keeps mapping
//! total: a broken record still yields one (empty) canonical record.

use crate::core::error::DomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// The record list stored under `key` in an upstream document
pub fn record_list<'a>(document: &'a Value, key: &str) -> Result<&'a [Value], DomainError> {
    if !document.is_object() {
        return Err(DomainError::MalformedUpstreamPayload(format!(
            "expected a JSON object holding '{}', got {}",
            key,
            kind_of(document)
        )));
    }
    match document.get(key) {
        Some(Value::Array(records)) => Ok(records),
        Some(other) => Err(DomainError::MalformedUpstreamPayload(format!(
            "expected a list under '{}', got {}",
            key,
            kind_of(other)
        ))),
        None => Err(DomainError::MalformedUpstreamPayload(format!(
            "missing '{}' list",
            key
        ))),
    }
}

/// Text value; numbers and booleans are rendered, null and containers are absent
pub fn text(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Nested object under `key`, if it is an object
pub fn object<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| v.is_object())
}

/// Boolean flag; anything other than a JSON boolean is absent
pub fn flag(record: &Value, key: &str) -> Option<bool> {
    record.get(key).and_then(Value::as_bool)
}

/// Publication year from a number or a numeric string
pub fn year(record: &Value, key: &str) -> Option<i32> {
    match record.get(key)? {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Timestamp from RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` (midnight UTC)
pub fn timestamp(record: &Value, key: &str) -> Option<DateTime<Utc>> {
    let raw = record.get(key)?.as_str()?.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
