//! Serde helpers for durations on the wire
//!
//! Durations are written as integer milliseconds and read from either a
//! number of milliseconds or a humantime string such as `"250ms"` or `"1s"`.

use std::time::Duration;

use serde::{de, Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Number(f64),
    Text(String),
}

pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    match RawDuration::deserialize(deserializer)? {
        RawDuration::Number(ms) => from_scaled(ms, 1e-3).map_err(de::Error::custom),
        RawDuration::Text(text) => parse_text(&text).map_err(de::Error::custom),
    }
}

/// Parse a humantime duration, also accepting a bare millisecond count
pub fn parse_text(text: &str) -> Result<Duration, String> {
    let text = text.trim();
    if let Ok(ms) = text.parse::<f64>() {
        return from_scaled(ms, 1e-3);
    }
    humantime::parse_duration(text).map_err(|e| format!("invalid duration '{}': {}", text, e))
}

/// Convert `value` units of `seconds_per_unit` seconds into a duration
pub fn from_scaled(value: f64, seconds_per_unit: f64) -> Result<Duration, String> {
    let nanos = (value * seconds_per_unit * 1e9).round();
    if !nanos.is_finite() || nanos < 0.0 {
        return Err(format!("duration must be a non-negative number, got {}", value));
    }
    if nanos >= u64::MAX as f64 {
        return Err(format!("duration {} is too large", value));
    }
    Ok(Duration::from_nanos(nanos as u64))
}
