use std::fmt;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Stamp format: ISO-8601 with `-` and `:` stripped so the stamp is both a
/// valid path segment and lexicographically sortable in chronological order.
///
/// Example: `20260830T142501.123+0000`.
const STAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3f%z";

/// A store instant: UTC wall-clock time truncated to millisecond precision.
///
/// Every snapshot directory is named by its `StoreTime` stamp, so the type
/// guarantees that two equal instants always render to the same stamp and
/// that stamp order equals chronological order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreTime(DateTime<Utc>);

impl StoreTime {
    /// The current wall-clock instant, truncated to milliseconds.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Build from a chrono datetime, truncating to millisecond precision.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let truncated = DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or(dt);
        Self(truncated)
    }

    /// Parse a directory stamp back into an instant.
    pub fn parse_stamp(stamp: &str) -> Result<Self, TypeError> {
        DateTime::parse_from_str(stamp, STAMP_FORMAT)
            .map(|dt| Self::from_datetime(dt.with_timezone(&Utc)))
            .map_err(|e| TypeError::InvalidStamp {
                stamp: stamp.to_string(),
                reason: e.to_string(),
            })
    }

    /// Render the directory stamp for this instant.
    pub fn stamp(&self) -> String {
        self.0.format(STAMP_FORMAT).to_string()
    }

    /// Calendar year of this instant.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Calendar month of this instant (1–12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// This instant shifted earlier by `ms` milliseconds.
    pub fn minus_millis(&self, ms: i64) -> Self {
        Self(self.0 - Duration::milliseconds(ms))
    }

    /// This instant shifted later by `ms` milliseconds.
    pub fn plus_millis(&self, ms: i64) -> Self {
        Self(self.0 + Duration::milliseconds(ms))
    }

    /// The underlying chrono datetime.
    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for StoreTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl fmt::Debug for StoreTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreTime({})", self.stamp())
    }
}

impl fmt::Display for StoreTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stamp())
    }
}

impl Serialize for StoreTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.stamp())
    }
}

impl<'de> Deserialize<'de> for StoreTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stamp = String::deserialize(deserializer)?;
        Self::parse_stamp(&stamp).map_err(de::Error::custom)
    }
}

/// Search direction for point-in-time resolution.
///
/// `Backward` finds the closest snapshot at or before the requested instant
/// (the default); `Forward` finds the closest at or after it. Exact equality
/// qualifies in both directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Backward,
    Forward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backward => f.write_str("backward"),
            Self::Forward => f.write_str("forward"),
        }
    }
}
