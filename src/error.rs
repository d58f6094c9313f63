//! Error types for the revdiff crate.

use crate::ids::IdError;

/// Errors produced by versioned files and their diffs.
#[derive(Debug, thiserror::Error)]
pub enum RevisionError {
    /// Requested revision is negative or not yet committed.
    #[error("bad revision: expected 0 to {}, got {requested}", .count.saturating_sub(1))]
    OutOfRange { requested: i64, count: usize },

    /// A versioned file without its original snapshot. Construction and
    /// deserialization both reject this state, so seeing it is a bug.
    #[error("versioned file has no revisions")]
    EmptyHistory,

    /// A stored line claims to originate from a revision after the one holding it.
    #[error("line {line} of revision {revision} claims origin revision {origin}")]
    InvalidOrigin {
        revision: usize,
        line: usize,
        origin: usize,
    },

    /// Minting a line identity failed.
    #[error("cannot create line identity: {0}")]
    Identity(#[from] IdError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed diff options.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience result type for revdiff operations.
pub type RevisionResult<T> = Result<T, RevisionError>;
