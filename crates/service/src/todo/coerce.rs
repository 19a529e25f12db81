//! Lenient decoding for todo inputs.
//!
//! Request bodies come from a browser form, so text fields may arrive as
//! numbers or `null` and the completion flag as anything at all. These helpers
//! turn any JSON value into the field's type instead of rejecting the body.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Textual form of a value. Falsy values (`null`, `false`, `0`, `""`)
/// become the empty string.
pub fn text_of(value: &Value) -> String {
    if !truthy(value) {
        return String::new();
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Truthiness: `false`, `null`, `0`, `NaN` and `""` are false, everything else true.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Value::deserialize(d).map(|v| text_of(&v))
}

pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Value::deserialize(d).map(|v| truthy(&v))
}

/// Like [`text`], for patch fields: only called when the key is present, so an
/// explicit `null` yields `Some("")` while a missing key stays `None`.
pub fn present_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    text(d).map(Some)
}

pub fn present_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    flag(d).map(Some)
}
