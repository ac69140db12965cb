use retune_instrument::InstrumentError;
use retune_types::{Direction, StoreTime, TypeError};

/// Errors from versioned store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The named instrument has no stored history at all.
    #[error("no instrument found with name '{name}'")]
    NotFound { name: String },

    /// The time walk crossed the store range (1960 backward, now + 20 years
    /// forward) without finding a snapshot.
    #[error("no snapshot found {direction} from {time} for instrument '{name}'")]
    OutOfRange {
        name: String,
        time: StoreTime,
        direction: Direction,
    },

    /// Undo was called at the root of the history.
    #[error("nothing to undo for instrument '{name}'")]
    NothingToUndo { name: String },

    /// A snapshot directory exists but its required document is missing
    /// (a crash between directory creation and content write).
    #[error("snapshot {slot} is missing instrument.json")]
    MissingDocument { slot: String },

    /// Instrument model failure (serialization or deserialization).
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Invalid instrument name or stamp.
    #[error(transparent)]
    Name(#[from] TypeError),

    /// I/O error from the underlying storage backend.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
