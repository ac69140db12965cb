use std::fmt;
use std::path::PathBuf;

use retune_types::StoreTime;

/// Required document inside every snapshot directory.
pub const INSTRUMENT_FILE: &str = "instrument.json";

/// Optional audit copy of the in-memory prior snapshot.
pub const PREVIOUS_FILE: &str = "previous_instrument.json";

/// Address of one snapshot: an instrument name plus its stamp.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotSlot {
    name: String,
    time: StoreTime,
}

impl SnapshotSlot {
    pub fn new(name: impl Into<String>, time: StoreTime) -> Self {
        Self {
            name: name.into(),
            time,
        }
    }

    /// The instrument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The snapshot stamp.
    pub fn time(&self) -> StoreTime {
        self.time
    }

    /// Path of this snapshot's directory relative to the store root:
    /// `<name>/<YYYY>/<MM>/<stamp>`.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.name)
            .join(format!("{:04}", self.time.year()))
            .join(format!("{:02}", self.time.month()))
            .join(self.time.stamp())
    }
}

impl fmt::Display for SnapshotSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.time.stamp())
    }
}

/// What a write actually did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOutcome {
    /// A fresh snapshot was written at the given stamp.
    Written(StoreTime),
    /// A historical state was re-materialized as a new head at the given
    /// stamp, recorded as a restore transition.
    Restored(StoreTime),
    /// Content equalled the current head; nothing was written.
    Unchanged,
}

impl StoreOutcome {
    /// The stamp of the new head, when one was written.
    pub fn time(&self) -> Option<StoreTime> {
        match self {
            Self::Written(t) | Self::Restored(t) => Some(*t),
            Self::Unchanged => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_layout() {
        let time = StoreTime::parse_stamp("20260830T142501.123+0000").unwrap();
        let slot = SnapshotSlot::new("laser1", time);
        assert_eq!(
            slot.relative_path(),
            PathBuf::from("laser1/2026/08/20260830T142501.123+0000"),
        );
    }

    #[test]
    fn display_pairs_name_and_stamp() {
        let time = StoreTime::parse_stamp("20240101T000000.000+0000").unwrap();
        let slot = SnapshotSlot::new("opa", time);
        assert_eq!(slot.to_string(), "opa@20240101T000000.000+0000");
    }

    #[test]
    fn outcome_time() {
        let time = StoreTime::parse_stamp("20240101T000000.000+0000").unwrap();
        assert_eq!(StoreOutcome::Written(time).time(), Some(time));
        assert_eq!(StoreOutcome::Restored(time).time(), Some(time));
        assert_eq!(StoreOutcome::Unchanged.time(), None);
    }
}
