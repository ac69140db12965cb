use std::collections::{BTreeMap, HashMap};
use std::io;
use std::sync::RwLock;

use retune_types::StoreTime;

use crate::error::StoreResult;
use crate::traits::StoreBackend;
use crate::types::SnapshotSlot;

/// Files inside one snapshot directory.
type FileMap = HashMap<String, Vec<u8>>;

/// In-memory, map-based store backend.
///
/// Intended for tests and embedding. Snapshots are held per instrument in a
/// `BTreeMap` keyed by stamp (so month listings are range scans) behind an
/// `RwLock` for safe concurrent access.
pub struct MemoryBackend {
    snapshots: RwLock<HashMap<String, BTreeMap<StoreTime, FileMap>>>,
}

impl MemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(HashMap::new()),
        }
    }

    /// Number of snapshots stored for one instrument.
    pub fn snapshot_count(&self, name: &str) -> usize {
        self.snapshots
            .read()
            .expect("lock poisoned")
            .get(name)
            .map_or(0, BTreeMap::len)
    }

    /// Total number of snapshots across all instruments.
    pub fn len(&self) -> usize {
        self.snapshots
            .read()
            .expect("lock poisoned")
            .values()
            .map(BTreeMap::len)
            .sum()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all snapshots.
    pub fn clear(&self) {
        self.snapshots.write().expect("lock poisoned").clear();
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBackend for MemoryBackend {
    fn instrument_exists(&self, name: &str) -> StoreResult<bool> {
        let map = self.snapshots.read().expect("lock poisoned");
        Ok(map.contains_key(name))
    }

    fn list_month(&self, name: &str, year: i32, month: u32) -> StoreResult<Vec<String>> {
        let map = self.snapshots.read().expect("lock poisoned");
        let Some(history) = map.get(name) else {
            return Ok(Vec::new());
        };
        Ok(history
            .keys()
            .filter(|t| t.year() == year && t.month() == month)
            .map(StoreTime::stamp)
            .collect())
    }

    fn read(&self, slot: &SnapshotSlot, file: &str) -> StoreResult<Option<Vec<u8>>> {
        let map = self.snapshots.read().expect("lock poisoned");
        Ok(map
            .get(slot.name())
            .and_then(|history| history.get(&slot.time()))
            .and_then(|files| files.get(file))
            .cloned())
    }

    fn create_snapshot(&self, slot: &SnapshotSlot) -> StoreResult<bool> {
        let mut map = self.snapshots.write().expect("lock poisoned");
        let history = map.entry(slot.name().to_string()).or_default();
        if history.contains_key(&slot.time()) {
            return Ok(false);
        }
        history.insert(slot.time(), FileMap::new());
        Ok(true)
    }

    fn write(&self, slot: &SnapshotSlot, file: &str, bytes: &[u8]) -> StoreResult<()> {
        let mut map = self.snapshots.write().expect("lock poisoned");
        let files = map
            .get_mut(slot.name())
            .and_then(|history| history.get_mut(&slot.time()))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("snapshot {slot} was not created"),
                )
            })?;
        files.insert(file.to_string(), bytes.to_vec());
        Ok(())
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("snapshot_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::INSTRUMENT_FILE;

    fn time(stamp: &str) -> StoreTime {
        StoreTime::parse_stamp(stamp).unwrap()
    }

    #[test]
    fn create_write_read() {
        let backend = MemoryBackend::new();
        let slot = SnapshotSlot::new("opa", time("20240315T120000.000+0000"));

        assert!(backend.create_snapshot(&slot).unwrap());
        backend.write(&slot, INSTRUMENT_FILE, b"{}").unwrap();

        let read = backend.read(&slot, INSTRUMENT_FILE).unwrap();
        assert_eq!(read.as_deref(), Some(b"{}".as_slice()));
        assert_eq!(backend.read(&slot, "data.wt5").unwrap(), None);
    }

    #[test]
    fn create_reports_collision() {
        let backend = MemoryBackend::new();
        let slot = SnapshotSlot::new("opa", time("20240315T120000.000+0000"));
        assert!(backend.create_snapshot(&slot).unwrap());
        assert!(!backend.create_snapshot(&slot).unwrap());
        assert_eq!(backend.snapshot_count("opa"), 1);
    }

    #[test]
    fn write_without_create_fails() {
        let backend = MemoryBackend::new();
        let slot = SnapshotSlot::new("opa", time("20240315T120000.000+0000"));
        assert!(backend.write(&slot, INSTRUMENT_FILE, b"{}").is_err());
    }

    #[test]
    fn list_month_filters_by_calendar() {
        let backend = MemoryBackend::new();
        for stamp in [
            "20240315T120000.000+0000",
            "20240316T120000.000+0000",
            "20240416T120000.000+0000",
            "20250315T120000.000+0000",
        ] {
            assert!(backend
                .create_snapshot(&SnapshotSlot::new("opa", time(stamp)))
                .unwrap());
        }

        let march = backend.list_month("opa", 2024, 3).unwrap();
        assert_eq!(march.len(), 2);
        assert!(backend.list_month("opa", 2024, 5).unwrap().is_empty());
        assert!(backend.list_month("other", 2024, 3).unwrap().is_empty());
    }

    #[test]
    fn instrument_exists_after_first_snapshot() {
        let backend = MemoryBackend::new();
        assert!(!backend.instrument_exists("opa").unwrap());
        backend
            .create_snapshot(&SnapshotSlot::new("opa", time("20240315T120000.000+0000")))
            .unwrap();
        assert!(backend.instrument_exists("opa").unwrap());
    }

    #[test]
    fn snapshot_exists_default_impl() {
        let backend = MemoryBackend::new();
        let t = time("20240315T120000.000+0000");
        backend
            .create_snapshot(&SnapshotSlot::new("opa", t))
            .unwrap();
        assert!(backend.snapshot_exists("opa", t).unwrap());
        assert!(!backend.snapshot_exists("opa", t.plus_millis(1)).unwrap());
    }

    #[test]
    fn clear_removes_all() {
        let backend = MemoryBackend::new();
        backend
            .create_snapshot(&SnapshotSlot::new("opa", time("20240315T120000.000+0000")))
            .unwrap();
        assert!(!backend.is_empty());
        backend.clear();
        assert!(backend.is_empty());
    }
}
