use serde::{Deserialize, Serialize};

use retune_types::StoreTime;

use crate::instrument::Instrument;

/// How a snapshot was produced.
///
/// Persisted inside `instrument.json`; `Restore` records the instant the
/// snapshot was restored to, which undo later walks past.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionKind {
    /// An organically edited state.
    #[default]
    Fresh,
    /// A re-materialization of the history at `time`.
    Restore { time: StoreTime },
}

/// An opaque raw dataset associated with a transition, persisted alongside
/// the snapshot as `data.<format>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionData {
    format: String,
    bytes: Vec<u8>,
}

impl TransitionData {
    /// Wrap raw bytes with their format extension (e.g. `"wt5"`).
    pub fn new(format: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            format: format.into(),
            bytes,
        }
    }

    /// The format extension.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// The raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The file name this dataset is stored under.
    pub fn file_name(&self) -> String {
        format!("data.{}", self.format)
    }
}

/// Provenance of an instrument state.
///
/// Only the kind is persisted. The `previous` link and the raw dataset are
/// in-memory companions: the writer persists `previous` as a
/// `previous_instrument.json` audit copy and the dataset as `data.<format>`,
/// but neither round-trips through `instrument.json`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Transition {
    #[serde(flatten)]
    kind: TransitionKind,
    #[serde(skip)]
    previous: Option<Box<Instrument>>,
    #[serde(skip)]
    data: Option<TransitionData>,
}

impl Transition {
    /// A fresh-edit transition with no links.
    pub fn fresh() -> Self {
        Self::default()
    }

    /// A restore transition targeting `time`.
    pub fn restore_to(time: StoreTime) -> Self {
        Self {
            kind: TransitionKind::Restore { time },
            previous: None,
            data: None,
        }
    }

    /// Attach the in-memory prior snapshot.
    pub fn with_previous(mut self, previous: Instrument) -> Self {
        self.previous = Some(Box::new(previous));
        self
    }

    /// Attach an associated raw dataset.
    pub fn with_data(mut self, data: TransitionData) -> Self {
        self.data = Some(data);
        self
    }

    /// The transition kind.
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// The restore target, when this is a restore transition.
    pub fn restore_time(&self) -> Option<StoreTime> {
        match self.kind {
            TransitionKind::Fresh => None,
            TransitionKind::Restore { time } => Some(time),
        }
    }

    /// The in-memory prior snapshot, if attached.
    pub fn previous(&self) -> Option<&Instrument> {
        self.previous.as_deref()
    }

    /// The associated raw dataset, if attached.
    pub fn data(&self) -> Option<&TransitionData> {
        self.data.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_serializes_with_kind_tag() {
        let json = serde_json::to_value(Transition::fresh()).unwrap();
        assert_eq!(json["kind"], "fresh");
    }

    #[test]
    fn restore_carries_target_time() {
        let time = StoreTime::parse_stamp("20240101T120000.000+0000").unwrap();
        let transition = Transition::restore_to(time);
        assert_eq!(transition.restore_time(), Some(time));

        let json = serde_json::to_value(&transition).unwrap();
        assert_eq!(json["kind"], "restore");
        assert_eq!(json["time"], "20240101T120000.000+0000");

        let back: Transition = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), TransitionKind::Restore { time });
    }

    #[test]
    fn previous_and_data_do_not_persist() {
        let time = StoreTime::parse_stamp("20240101T120000.000+0000").unwrap();
        let transition = Transition::restore_to(time)
            .with_data(TransitionData::new("wt5", vec![1, 2, 3]));
        let json = serde_json::to_string(&transition).unwrap();
        let back: Transition = serde_json::from_str(&json).unwrap();
        assert!(back.previous().is_none());
        assert!(back.data().is_none());
    }

    #[test]
    fn data_file_name() {
        let data = TransitionData::new("wt5", vec![]);
        assert_eq!(data.file_name(), "data.wt5");
    }
}
