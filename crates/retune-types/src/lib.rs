//! Foundation types for the retune calibration store.
//!
//! This crate provides the temporal and naming primitives shared by the
//! instrument model and the versioned store. Every other retune crate
//! depends on `retune-types`.
//!
//! # Key Types
//!
//! - [`StoreTime`] — Millisecond-precision UTC instant with a path-safe,
//!   lexicographically sortable stamp format
//! - [`Direction`] — Search direction for point-in-time resolution
//! - [`validate_instrument_name`] — Instrument names double as path segments
//!   and must be validated before they touch the filesystem

pub mod error;
pub mod names;
pub mod time;

pub use error::TypeError;
pub use names::validate_instrument_name;
pub use time::{Direction, StoreTime};
