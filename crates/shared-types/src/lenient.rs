//! Lenient field decoders for spreadsheet-exported JSON.
//!
//! The exporter writes codes and counts either as JSON strings or as JSON
//! numbers depending on the cell format, so both are accepted.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Decodes a scan code or lot id from a string, a number or `null`.
///
/// Numbers keep their JSON text (`8801` → `"8801"`). `null` becomes the
/// empty string, which never matches a probe.
pub fn code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected string or number for code, found {other}"
        ))),
    }
}

/// Decodes a non-negative box count from an integer, a float or a numeric string.
///
/// Floats are truncated toward zero and negative values clamp to zero.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if n.as_i64().is_some() {
                Ok(0)
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                Ok(if f.is_sign_negative() { 0 } else { f.trunc() as u64 })
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(v) = trimmed.parse::<u64>() {
                return Ok(v);
            }
            match trimmed.parse::<i64>() {
                Ok(_) => Ok(0),
                Err(_) => Err(de::Error::custom(format!("invalid box count {s:?}"))),
            }
        }
        Value::Null => Ok(0),
        other => Err(de::Error::custom(format!(
            "expected number for box count, found {other}"
        ))),
    }
}

/// Decodes an epoch-seconds timestamp written either as an integer or as a
/// fractional float; fractions are truncated.
pub fn epoch_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => match n.as_u64() {
            Some(v) => Ok(v),
            None => match n.as_f64() {
                Some(f) if f >= 0.0 => Ok(f.trunc() as u64),
                _ => Err(de::Error::custom(format!("invalid timestamp {n}"))),
            },
        },
        other => Err(de::Error::custom(format!(
            "expected number for timestamp, found {other}"
        ))),
    }
}
