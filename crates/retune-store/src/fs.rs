use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreResult;
use crate::traits::StoreBackend;
use crate::types::SnapshotSlot;

/// Environment variable overriding the default store root.
pub const STORE_ENV_VAR: &str = "RETUNE_STORE";

/// Resolve the ambient store root: `RETUNE_STORE` (non-empty) if set, else
/// the platform per-user data directory joined with `retune`.
///
/// Prefer injecting an explicit root via [`FsBackend::new`] in library code;
/// this ambient resolution exists for application entry points.
pub fn default_root() -> PathBuf {
    match env::var(STORE_ENV_VAR) {
        Ok(value) if !value.is_empty() => PathBuf::from(value),
        _ => dirs::data_dir()
            .map(|dir| dir.join("retune"))
            .unwrap_or_else(|| PathBuf::from(".retune")),
    }
}

/// Blocking filesystem store backend rooted at an injected path.
///
/// Snapshot directories live at `<root>/<name>/<YYYY>/<MM>/<stamp>/`.
/// Directory creation is a single atomic mkdir, so concurrent readers never
/// observe a partially named slot; collisions are reported to the writer for
/// retry rather than resolved here.
#[derive(Clone, Debug)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Create a backend over the given root. The root directory itself is
    /// created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_dir(&self, slot: &SnapshotSlot) -> PathBuf {
        self.root.join(slot.relative_path())
    }
}

impl StoreBackend for FsBackend {
    fn instrument_exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.root.join(name).is_dir())
    }

    fn list_month(&self, name: &str, year: i32, month: u32) -> StoreResult<Vec<String>> {
        let dir = self
            .root
            .join(name)
            .join(format!("{year:04}"))
            .join(format!("{month:02}"));
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    fn read(&self, slot: &SnapshotSlot, file: &str) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.slot_dir(slot).join(file)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn create_snapshot(&self, slot: &SnapshotSlot) -> StoreResult<bool> {
        let dir = self.slot_dir(slot);
        if let Some(parent) = dir.parent() {
            fs::create_dir_all(parent)?;
        }
        match fs::create_dir(&dir) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, slot: &SnapshotSlot, file: &str, bytes: &[u8]) -> StoreResult<()> {
        fs::write(self.slot_dir(slot).join(file), bytes)?;
        Ok(())
    }
}
