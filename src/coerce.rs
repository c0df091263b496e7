//! Safe accessors over loosely-typed JSON values.
//!
//! The repair pipeline reads AI-generated JSON that is frequently incomplete
//! or mis-shaped. These helpers centralize the defensive reads so callers
//! never index into a `Value` directly.

use serde_json::Value;

/// Read a field as a trimmed non-empty string, or fall back.
pub fn string_or(obj: &Value, field: &str, fallback: &str) -> String {
    match obj.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

/// Read a field as a trimmed non-empty string, if present.
pub fn non_empty_string(obj: &Value, field: &str) -> Option<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Read a field only if it is literally a JSON array.
pub fn array<'a>(obj: &'a Value, field: &str) -> Option<&'a Vec<Value>> {
    obj.get(field).and_then(Value::as_array)
}

/// Read a field only if it is a non-null JSON object.
pub fn object<'a>(obj: &'a Value, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| v.is_object())
}

/// Read a field as a boolean, defaulting when absent or mis-typed.
pub fn bool_or(obj: &Value, field: &str, fallback: bool) -> bool {
    obj.get(field).and_then(Value::as_bool).unwrap_or(fallback)
}
