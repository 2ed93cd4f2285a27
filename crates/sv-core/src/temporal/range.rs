//! Visible range of an axis-bound chart

use std::time::Duration;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::duration;

/// Width of the sliding window in axis mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemporalRange {
    /// No windowing; the chart is still tagged as time-scaled
    #[default]
    Infinite,
    Window(Duration),
}

impl TemporalRange {
    pub fn minutes(minutes: u64) -> Self {
        TemporalRange::Window(Duration::from_secs(minutes * 60))
    }

    /// Window width in milliseconds, `None` when infinite
    pub fn millis(&self) -> Option<f64> {
        match self {
            TemporalRange::Infinite => None,
            TemporalRange::Window(width) => Some(width.as_secs_f64() * 1000.0),
        }
    }
}

impl Serialize for TemporalRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TemporalRange::Infinite => serializer.serialize_str("infinite"),
            TemporalRange::Window(width) => {
                serializer.collect_str(&humantime::format_duration(*width))
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRange {
    Minutes(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for TemporalRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawRange::deserialize(deserializer)? {
            // Bare numbers count minutes
            RawRange::Minutes(minutes) => duration::from_scaled(minutes, 60.0)
                .map(TemporalRange::Window)
                .map_err(de::Error::custom),
            RawRange::Text(text) if text.trim().eq_ignore_ascii_case("infinite") => {
                Ok(TemporalRange::Infinite)
            }
            RawRange::Text(text) => humantime::parse_duration(text.trim())
                .map(TemporalRange::Window)
                .map_err(|e| de::Error::custom(format!("invalid range '{}': {}", text, e))),
        }
    }
}
