//! Lenient decoders for backend payloads.
//!
//! The backend stores scraped documents as-is, so the same logical field can
//! arrive in more than one shape. These helpers normalize them at the edge.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a skill list that may be a JSON array, a string holding a
/// serialized JSON array, a comma-separated string, or null.
pub fn skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    skills_from_value(value).map_err(D::Error::custom)
}

/// Normalize a skill value already parsed into JSON.
pub fn skills_from_value(value: Value) -> Result<Vec<String>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.into_iter().filter_map(value_to_string).collect()),
        Value::String(raw) => Ok(decode_skill_string(&raw)),
        other => Err(format!("expected a skill list, got {other}")),
    }
}

/// Decode a skill list serialized into a string.
///
/// Strings that parse as a JSON array are decoded as such; anything else is
/// treated as a comma-separated list.
pub fn decode_skill_string(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.starts_with('[')
        && let Ok(items) = serde_json::from_str::<Vec<Value>>(trimmed)
    {
        return items.into_iter().filter_map(value_to_string).collect();
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 and the naive ISO form Python emits for
/// timezone-unaware datetimes, which is taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|dt| Utc.from_local_datetime(&dt).single())
}

/// Decode an optional timestamp, discarding values that don't parse.
pub fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Decode a non-negative count that may arrive as an integer, a float or null.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_u32(deserializer)?.unwrap_or(0))
}

/// Like [`lenient_u32`] but keeps absence distinct from zero.
pub fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .map(|v| v.min(u32::MAX as u64) as u32)
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u32)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Decode a flag that may arrive as a boolean or as a 0/1 number.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    })
}

/// Decode a string that may be null.
pub fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
