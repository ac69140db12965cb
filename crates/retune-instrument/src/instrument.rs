use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use retune_types::StoreTime;

use crate::arrangement::Arrangement;
use crate::error::{InstrumentError, Result};
use crate::note::{Note, Setting};
use crate::setable::Setable;
use crate::transition::Transition;
use crate::tune::Curve;

/// A calibration state for a named device.
///
/// The calibration state proper is the set of arrangements and setables.
/// `transition` records how this state was produced and `load` tags values
/// read back from the store with the stamp they came from; neither takes
/// part in equality.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Instrument {
    name: String,
    #[serde(default)]
    arrangements: BTreeMap<String, Arrangement>,
    #[serde(default)]
    setables: BTreeMap<String, Setable>,
    #[serde(default)]
    transition: Transition,
    #[serde(skip)]
    load: Option<StoreTime>,
}

impl PartialEq for Instrument {
    /// Value equality over calibration state only, ignoring time metadata.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.arrangements == other.arrangements
            && self.setables == other.setables
    }
}

impl Instrument {
    /// Build a fresh instrument from its calibration state.
    pub fn new(
        name: impl Into<String>,
        arrangements: BTreeMap<String, Arrangement>,
        setables: BTreeMap<String, Setable>,
    ) -> Self {
        Self {
            name: name.into(),
            arrangements,
            setables,
            transition: Transition::fresh(),
            load: None,
        }
    }

    /// The device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All arrangements, keyed by name.
    pub fn arrangements(&self) -> &BTreeMap<String, Arrangement> {
        &self.arrangements
    }

    /// All setables, keyed by name.
    pub fn setables(&self) -> &BTreeMap<String, Setable> {
        &self.setables
    }

    /// How this state was produced.
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Replace the transition, keeping the calibration state.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    /// The stamp this value was read from, if it came from the store.
    pub fn load(&self) -> Option<StoreTime> {
        self.load
    }

    /// Rebuild this value as a restore product targeting `time`, with the
    /// current head attached as the prior snapshot. Clears the read-from tag
    /// so the writer persists it directly.
    pub fn into_restore(mut self, time: StoreTime, head: Instrument) -> Self {
        self.transition = Transition::restore_to(time).with_previous(head);
        self.load = None;
        self
    }

    /// Evaluate every setable at `position` through the arrangement covering
    /// it, producing the settings to apply.
    ///
    /// Fails if no arrangement (or more than one) covers `position`, or if a
    /// setable can be resolved neither through a curve nor a default.
    pub fn note(&self, position: f64) -> Result<Note> {
        let mut covering: Vec<&Arrangement> = self
            .arrangements
            .values()
            .filter(|arr| arr.contains(position))
            .collect();

        let arrangement = match covering.len() {
            0 => return Err(InstrumentError::NoArrangement { position }),
            1 => covering.remove(0),
            _ => {
                return Err(InstrumentError::OverlappingArrangements {
                    position,
                    names: covering.iter().map(|a| a.name().to_string()).collect(),
                })
            }
        };

        let mut settings = BTreeMap::new();
        for (name, setable) in &self.setables {
            let setting = match arrangement.get(name) {
                Some(Curve::Tune(tune)) => Setting::Position(tune.at(position)),
                Some(Curve::Discrete(tune)) => match tune.at(position) {
                    Some(key) => Setting::Key(key.to_string()),
                    None => {
                        return Err(InstrumentError::UndefinedAt {
                            setable: name.clone(),
                            position,
                        })
                    }
                },
                None => match setable.default() {
                    Some(default) => Setting::Position(default),
                    None => {
                        return Err(InstrumentError::MissingSetting {
                            setable: name.clone(),
                            arrangement: arrangement.name().to_string(),
                        })
                    }
                },
            };
            settings.insert(name.clone(), setting);
        }

        Ok(Note::new(arrangement.name(), position, settings))
    }

    /// Serialize this instrument as a JSON document with a trailing newline.
    pub fn save<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Reconstruct an instrument from a document, tagging it with the store
    /// time it was read from.
    pub fn open<R: Read>(reader: R, load: StoreTime) -> Result<Self> {
        let mut instrument: Self = serde_json::from_reader(reader)?;
        instrument.load = Some(load);
        Ok(instrument)
    }
}
