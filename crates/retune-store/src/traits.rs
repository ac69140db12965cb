use crate::error::StoreResult;
use crate::types::SnapshotSlot;

use retune_types::StoreTime;

/// Physical storage for snapshot directories.
///
/// The trait abstracts the `<name>/<YYYY>/<MM>/<stamp>/` layout so resolver
/// and writer logic are independent of the physical medium and testable
/// against an in-memory backend.
///
/// All implementations must satisfy these invariants:
/// - Snapshot creation is a single atomic operation; readers never observe a
///   partially created slot name.
/// - Existing snapshots are never mutated or deleted in normal operation.
/// - `create_snapshot` reports a collision instead of overwriting.
/// - All I/O errors are propagated, never silently ignored.
pub trait StoreBackend: Send + Sync {
    /// Whether any history exists for the named instrument.
    fn instrument_exists(&self, name: &str) -> StoreResult<bool>;

    /// List the stamp directory names under one month of an instrument's
    /// history, in no particular order.
    ///
    /// Returns an empty list when the month has no snapshots.
    fn list_month(&self, name: &str, year: i32, month: u32) -> StoreResult<Vec<String>>;

    /// Read one file from a snapshot directory.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    fn read(&self, slot: &SnapshotSlot, file: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Atomically claim a snapshot directory.
    ///
    /// Returns `Ok(false)` when the slot already exists (a stamp collision);
    /// the writer retries with a freshly generated stamp.
    fn create_snapshot(&self, slot: &SnapshotSlot) -> StoreResult<bool>;

    /// Write one file into an already-created snapshot directory.
    fn write(&self, slot: &SnapshotSlot, file: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Convenience: whether a snapshot exists at exactly this stamp.
    fn snapshot_exists(&self, name: &str, time: StoreTime) -> StoreResult<bool> {
        let stamp = time.stamp();
        Ok(self
            .list_month(name, time.year(), time.month())?
            .iter()
            .any(|entry| *entry == stamp))
    }
}
