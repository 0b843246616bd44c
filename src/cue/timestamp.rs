//! Timestamps as they appear in film data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timecode::{format_seconds, parse_timestamp};

/// A point in the film, either as written text or as raw seconds.
///
/// Film documents use both `"timestamp": "00:01:30"` and `"time": 90`, so the
/// value is kept as given and converted on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Raw seconds
    Seconds(f64),
    /// `HH:MM:SS` or `MM:SS` text
    Text(String),
}

impl Timestamp {
    /// Position in seconds. Malformed text counts as zero.
    pub fn seconds(&self) -> f64 {
        match self {
            Timestamp::Seconds(secs) => *secs,
            Timestamp::Text(text) => parse_timestamp(text) as f64,
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Seconds(0.0)
    }
}

impl From<f64> for Timestamp {
    fn from(secs: f64) -> Self {
        Timestamp::Seconds(secs)
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Timestamp::Text(text.to_string())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Text(text) => write!(f, "{}", text),
            Timestamp::Seconds(secs) => write!(f, "{}", format_seconds(*secs)),
        }
    }
}
