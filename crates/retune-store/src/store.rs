use std::path::PathBuf;

use tracing::{debug, warn};

use retune_instrument::Instrument;
use retune_types::{validate_instrument_name, Direction, StoreTime};

use crate::error::{StoreError, StoreResult};
use crate::fs::{default_root, FsBackend};
use crate::resolve::resolve_time;
use crate::traits::StoreBackend;
use crate::types::{SnapshotSlot, StoreOutcome, INSTRUMENT_FILE, PREVIOUS_FILE};

/// The versioned instrument store.
///
/// Append-only: storing never mutates or deletes existing snapshots. The
/// head for a name is whatever resolves backward from "now"; concurrent
/// writers race only on stamp allocation, which the writer retries, so
/// logically conflicting heads settle last-writer-wins.
pub struct InstrumentStore<B = FsBackend> {
    backend: B,
}

impl InstrumentStore<FsBackend> {
    /// Open a store rooted at an explicit path.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::with_backend(FsBackend::new(root))
    }

    /// Open a store at the ambient root (`RETUNE_STORE` else the platform
    /// data directory).
    pub fn open_default() -> Self {
        Self::open(default_root())
    }
}

impl<B: StoreBackend> InstrumentStore<B> {
    /// Build a store over any backend.
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Find the stamp of the snapshot closest to `time` in `direction`,
    /// inclusive of `time` itself.
    pub fn resolve(
        &self,
        name: &str,
        time: StoreTime,
        direction: Direction,
    ) -> StoreResult<StoreTime> {
        resolve_time(&self.backend, name, time, direction)
    }

    /// Load the current head for `name`.
    pub fn load(&self, name: &str) -> StoreResult<Instrument> {
        self.load_with(name, StoreTime::now(), Direction::Backward)
    }

    /// Load the snapshot at or before `time`.
    pub fn load_at(&self, name: &str, time: StoreTime) -> StoreResult<Instrument> {
        self.load_with(name, time, Direction::Backward)
    }

    /// Load the snapshot closest to `time` in `direction`, tagged with the
    /// stamp it was read from.
    pub fn load_with(
        &self,
        name: &str,
        time: StoreTime,
        direction: Direction,
    ) -> StoreResult<Instrument> {
        let stamp = self.resolve(name, time, direction)?;
        let slot = SnapshotSlot::new(name, stamp);
        let bytes = self
            .backend
            .read(&slot, INSTRUMENT_FILE)?
            .ok_or_else(|| StoreError::MissingDocument {
                slot: slot.to_string(),
            })?;
        Ok(Instrument::open(bytes.as_slice(), stamp)?)
    }

    /// Persist a new snapshot for `instrument`, or skip with a warning when
    /// its content equals the current head.
    ///
    /// A value read back from the store (its `load` tag is set) is persisted
    /// through [`restore`](Self::restore), so every revert is recorded as a
    /// restore transition. An in-memory prior snapshot is stored first
    /// (quietly), keeping the transition chain on disk ahead of its
    /// dependents.
    pub fn store(&self, instrument: &Instrument) -> StoreResult<StoreOutcome> {
        self.store_inner(instrument, true)
    }

    fn store_inner(&self, instrument: &Instrument, warn: bool) -> StoreResult<StoreOutcome> {
        validate_instrument_name(instrument.name())?;

        match self.load(instrument.name()) {
            Ok(head) if head == *instrument => {
                if warn {
                    warn!(
                        name = instrument.name(),
                        "store skipped: content equals current head"
                    );
                }
                return Ok(StoreOutcome::Unchanged);
            }
            Ok(_) | Err(StoreError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        if let Some(stamp) = instrument.load() {
            return self.restore_inner(instrument.name(), stamp, warn);
        }

        if let Some(previous) = instrument.transition().previous() {
            self.store_inner(previous, false)?;
        }

        let stamp = self.write_snapshot(instrument)?;
        Ok(StoreOutcome::Written(stamp))
    }

    /// Re-materialize the snapshot at `time` as a new head, recorded as a
    /// restore transition with the current head as its prior snapshot.
    pub fn restore(&self, name: &str, time: StoreTime) -> StoreResult<StoreOutcome> {
        self.restore_inner(name, time, true)
    }

    fn restore_inner(&self, name: &str, time: StoreTime, warn: bool) -> StoreResult<StoreOutcome> {
        let historical = self.load_at(name, time)?;
        let head = self.load(name)?;
        if head == historical {
            if warn {
                warn!(
                    name,
                    time = %time,
                    "restore skipped: target content equals current head"
                );
            }
            return Ok(StoreOutcome::Unchanged);
        }

        let restored = historical.into_restore(time, head);
        let stamp = self.write_snapshot(&restored)?;
        Ok(StoreOutcome::Restored(stamp))
    }

    /// Compute (without persisting) the logically-previous state of
    /// `instrument`.
    ///
    /// A restore product steps to just before its restore target; a value
    /// with an in-memory prior snapshot returns that; a value read from the
    /// store steps to just before the stamp it came from. Callers typically
    /// re-store the result, which is then recorded as a restore transition.
    pub fn undo(&self, instrument: &Instrument) -> StoreResult<Instrument> {
        if let Some(target) = instrument.transition().restore_time() {
            return self.just_before(instrument.name(), target);
        }
        if let Some(previous) = instrument.transition().previous() {
            return Ok(previous.clone());
        }
        if let Some(stamp) = instrument.load() {
            return self.just_before(instrument.name(), stamp);
        }
        Err(StoreError::NothingToUndo {
            name: instrument.name().to_string(),
        })
    }

    /// The snapshot strictly before `time`: subtracting one millisecond
    /// lands before the instant even when `time` names an exact snapshot.
    /// Walking off the root of the history is nothing to undo.
    fn just_before(&self, name: &str, time: StoreTime) -> StoreResult<Instrument> {
        match self.load_at(name, time.minus_millis(1)) {
            Ok(instrument) => Ok(instrument),
            Err(StoreError::NotFound { .. } | StoreError::OutOfRange { .. }) => {
                Err(StoreError::NothingToUndo {
                    name: name.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Allocate a stamp, claim the directory (retrying on collision), and
    /// write the snapshot's files.
    fn write_snapshot(&self, instrument: &Instrument) -> StoreResult<StoreTime> {
        let slot = loop {
            let candidate = SnapshotSlot::new(instrument.name(), StoreTime::now());
            if self.backend.create_snapshot(&candidate)? {
                break candidate;
            }
            debug!(slot = %candidate, "stamp collision, retrying");
        };

        let mut document = Vec::new();
        instrument.save(&mut document)?;
        self.backend.write(&slot, INSTRUMENT_FILE, &document)?;

        if let Some(data) = instrument.transition().data() {
            self.backend.write(&slot, &data.file_name(), data.bytes())?;
        }

        if let Some(previous) = instrument.transition().previous() {
            let mut audit = Vec::new();
            previous.save(&mut audit)?;
            self.backend.write(&slot, PREVIOUS_FILE, &audit)?;
        }

        debug!(slot = %slot, "snapshot written");
        Ok(slot.time())
    }
}
