use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid store time stamp: {stamp}: {reason}")]
    InvalidStamp { stamp: String, reason: String },

    #[error("invalid instrument name: {name}: {reason}")]
    InvalidName { name: String, reason: String },
}
