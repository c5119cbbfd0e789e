//! Lenient casting for user-supplied field values.
//!
//! Request bodies are loosely typed: a client may send `"age": "30"` or
//! `"name": 42`. Scalars are coerced to the declared field type, `null` is
//! treated as "not supplied", and structured values are rejected with a
//! cast error that names the offending value.

use serde::de::{self, Deserialize, Deserializer};
use serde::Serializer;
use serde_json::Value;

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

fn cast_error<E: de::Error>(target: &str, value: &Value) -> E {
    E::custom(format!(
        "Cast to {} failed for value {} (type {})",
        target,
        value,
        type_name(value)
    ))
}

/// Deserialize an optional string, stringifying numbers and booleans.
pub fn to_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(cast_error("string", &other)),
    }
}

/// Deserialize an optional finite number, parsing numeric strings.
pub fn to_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    let number = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Array(_) | Value::Object(_) => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(cast_error("Number", &value)),
    }
}

/// Serialize integral values as JSON integers (`30`, not `30.0`).
pub fn serialize_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => serializer.serialize_i64(*n as i64),
        Some(n) => serializer.serialize_f64(*n),
        None => serializer.serialize_none(),
    }
}
