use thiserror::Error;

/// Errors from instrument model operations.
#[derive(Debug, Error)]
pub enum InstrumentError {
    /// A tune needs at least two sample points.
    #[error("tune needs at least two sample points, got {points}")]
    TooFewPoints { points: usize },

    /// Independent and dependent sample arrays differ in length.
    #[error("tune sample length mismatch: {independent} independent vs {dependent} dependent")]
    LengthMismatch {
        independent: usize,
        dependent: usize,
    },

    /// Independent sample points must be strictly increasing.
    #[error("tune independent points must be strictly increasing")]
    NotMonotonic,

    /// No arrangement covers the requested position.
    #[error("no arrangement covers position {position}")]
    NoArrangement { position: f64 },

    /// More than one arrangement covers the requested position.
    #[error("arrangements {names:?} overlap at position {position}")]
    OverlappingArrangements { position: f64, names: Vec<String> },

    /// A setable has no curve in the selected arrangement and no default.
    #[error("setable '{setable}' has no curve in arrangement '{arrangement}' and no default")]
    MissingSetting {
        setable: String,
        arrangement: String,
    },

    /// A discrete tune has no key covering the position and no default.
    #[error("discrete tune for '{setable}' is undefined at position {position}")]
    UndefinedAt { setable: String, position: f64 },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while writing or reading a document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for instrument model operations.
pub type Result<T> = std::result::Result<T, InstrumentError>;
