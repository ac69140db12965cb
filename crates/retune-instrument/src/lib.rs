//! Calibration instrument model for retune.
//!
//! An [`Instrument`] is an immutable calibration state for a named device:
//! a set of [`Arrangement`]s (named groups of tuning curves) evaluated
//! through [`Setable`]s (the hardware axes being driven). Evaluating an
//! instrument at a position yields a [`Note`] — the concrete settings to
//! apply.
//!
//! Each instrument carries a [`Transition`] describing how it was produced
//! (a fresh edit or a restore of an earlier snapshot) and an optional `load`
//! tag naming the store time it was read from. Equality compares calibration
//! state only, ignoring both.
//!
//! Curve *fitting* is out of scope here; tunes are sampled curves evaluated
//! by linear interpolation.
//!
//! # Modules
//!
//! - [`error`] — Error types for model operations
//! - [`tune`] — [`Tune`], [`DiscreteTune`], and the [`Curve`] wrapper
//! - [`arrangement`] — Named curve groups with validity bounds
//! - [`setable`] — Hardware axes
//! - [`note`] — Evaluation results
//! - [`transition`] — Snapshot provenance
//! - [`instrument`] — The [`Instrument`] itself and its save/open contract

pub mod arrangement;
pub mod error;
pub mod instrument;
pub mod note;
pub mod setable;
pub mod transition;
pub mod tune;

pub use arrangement::Arrangement;
pub use error::InstrumentError;
pub use instrument::Instrument;
pub use note::{Note, Setting};
pub use setable::Setable;
pub use transition::{Transition, TransitionData, TransitionKind};
pub use tune::{Curve, DiscreteTune, Tune};
