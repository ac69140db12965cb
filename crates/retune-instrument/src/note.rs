use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One resolved setting for a setable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Setting {
    /// A continuous position from a [`Tune`](crate::Tune).
    Position(f64),
    /// A discrete key from a [`DiscreteTune`](crate::DiscreteTune).
    Key(String),
}

impl Setting {
    /// The continuous position, if this is one.
    pub fn as_position(&self) -> Option<f64> {
        match self {
            Self::Position(p) => Some(*p),
            Self::Key(_) => None,
        }
    }

    /// The discrete key, if this is one.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Position(_) => None,
            Self::Key(k) => Some(k),
        }
    }
}

/// The result of evaluating an instrument at one independent position: the
/// arrangement that applied and one setting per setable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    arrangement: String,
    position: f64,
    settings: BTreeMap<String, Setting>,
}

impl Note {
    pub(crate) fn new(
        arrangement: impl Into<String>,
        position: f64,
        settings: BTreeMap<String, Setting>,
    ) -> Self {
        Self {
            arrangement: arrangement.into(),
            position,
            settings,
        }
    }

    /// The arrangement that produced this note.
    pub fn arrangement(&self) -> &str {
        &self.arrangement
    }

    /// The independent position this note was evaluated at.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// All settings, keyed by setable name.
    pub fn settings(&self) -> &BTreeMap<String, Setting> {
        &self.settings
    }

    /// The setting for one setable.
    pub fn get(&self, setable: &str) -> Option<&Setting> {
        self.settings.get(setable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_accessors() {
        assert_eq!(Setting::Position(1.5).as_position(), Some(1.5));
        assert_eq!(Setting::Position(1.5).as_key(), None);
        assert_eq!(Setting::Key("hi".into()).as_key(), Some("hi"));
        assert_eq!(Setting::Key("hi".into()).as_position(), None);
    }

    #[test]
    fn note_lookup() {
        let mut settings = BTreeMap::new();
        settings.insert("delay".to_string(), Setting::Position(3.0));
        let note = Note::new("arr", 0.5, settings);
        assert_eq!(note.arrangement(), "arr");
        assert_eq!(note.position(), 0.5);
        assert_eq!(note.get("delay"), Some(&Setting::Position(3.0)));
        assert_eq!(note.get("missing"), None);
    }
}
