//! Versioned instrument store for retune.
//!
//! This crate implements a time-indexed, append-only persistence layer for
//! calibration snapshots. Every successive state of a named instrument is
//! written to its own timestamped directory; the store supports
//! point-in-time retrieval, reverts recorded as first-class restore events,
//! and chained undo that walks the transition chain backward.
//!
//! # On-Disk Layout
//!
//! ```text
//! root/<name>/<YYYY>/<MM>/<stamp>/
//!     instrument.json             (required)
//!     data.<fmt>                  (optional raw dataset)
//!     previous_instrument.json    (optional audit copy)
//! ```
//!
//! Stamps are millisecond-precision ISO-8601 instants with `-` and `:`
//! stripped, so directory names sort lexicographically in chronological
//! order. The monthly granularity bounds directory-listing cost for sparse,
//! human-paced calibration histories without a separate global index.
//!
//! # Storage Backends
//!
//! All backends implement the [`StoreBackend`] trait:
//!
//! - [`FsBackend`] — blocking filesystem store rooted at an injected path
//! - [`MemoryBackend`] — `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Writing is append-only: existing snapshot directories are never
//!    mutated or deleted in normal operation.
//! 2. A stamp collision at creation time is retried with a fresh stamp; this
//!    is the sole cross-process concurrency mechanism, no locking is used.
//! 3. Storing content equal to the current head is a warned no-op.
//! 4. Every revert goes through the restore path so it is recorded as a
//!    restore transition, never as a silent overwrite.
//! 5. The resolver never validates directory contents before selecting one;
//!    an orphaned directory surfaces at load time as a missing document.

pub mod error;
pub mod fs;
pub mod memory;
mod resolve;
pub mod store;
pub mod traits;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use fs::{default_root, FsBackend, STORE_ENV_VAR};
pub use memory::MemoryBackend;
pub use store::InstrumentStore;
pub use traits::StoreBackend;
pub use types::{SnapshotSlot, StoreOutcome, INSTRUMENT_FILE, PREVIOUS_FILE};
