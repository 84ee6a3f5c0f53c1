//! Wall-clock time parsing and serde helpers.
//!
//! Shift times are stored as time-of-day values without a date. They are
//! written as `HH:MM` and accepted as `HH:MM` or `HH:MM:SS`; anything else
//! is rejected here, at the boundary, so the hour arithmetic never sees a
//! malformed value.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{EngineError, EngineResult};

const OUTPUT_FORMAT: &str = "%H:%M";

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
///
/// # Example
///
/// ```
/// use roster_engine::models::parse_wall_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_wall_time("22:30").unwrap(), NaiveTime::from_hms_opt(22, 30, 0).unwrap());
/// assert_eq!(parse_wall_time("06:00:00").unwrap(), NaiveTime::from_hms_opt(6, 0, 0).unwrap());
/// assert!(parse_wall_time("24:00").is_err());
/// ```
pub fn parse_wall_time(value: &str) -> EngineResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| EngineError::InvalidTime {
            value: value.to_string(),
        })
}

/// Serializes a time as `HH:MM`.
pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format(OUTPUT_FORMAT).to_string())
}

/// Deserializes a time from `HH:MM` or `HH:MM:SS`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_wall_time(&raw).map_err(serde::de::Error::custom)
}

/// Serde helpers for optional wall-clock times (split-shift second blocks).
pub mod option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{OUTPUT_FORMAT, parse_wall_time};

    /// Serializes an optional time as `HH:MM` or `null`.
    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format(OUTPUT_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional time; `null` and empty strings become `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_wall_time(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
