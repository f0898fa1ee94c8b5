//! Error types for statement building and batch execution.

use thiserror::Error;
use tzc_core::enums::TerminalState;
use tzc_core::errors::CoreError;
use tzc_db::error::DatabaseError;

/// A statement could not be built. Local to the column or table it was for.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid {kind} name: {source}")]
    InvalidIdentifier {
        kind: &'static str,
        #[source]
        source: CoreError,
    },

    #[error("table '{table}' has no columns to convert")]
    EmptyTable { table: String },
}

/// Failures that end a run before every statement was attempted, or that
/// invalidate the unit of work afterwards.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Column discovery failed; nothing was written.
    #[error("failed to read column metadata: {0}")]
    Metadata(DatabaseError),

    #[error("failed to open transaction: {0}")]
    Begin(DatabaseError),

    #[error("connection lost while converting {target}: {source}")]
    ConnectionLost {
        target: String,
        #[source]
        source: DatabaseError,
    },

    /// Halt-on-error stopped the batch at `target`.
    #[error("halted on error at {target}: {message}")]
    Aborted { target: String, message: String },

    #[error("commit failed: {0}")]
    Commit(DatabaseError),
}

impl ConvertError {
    /// Terminal state a run ends in when it fails with this error.
    #[must_use]
    pub const fn terminal_state(&self) -> TerminalState {
        match self {
            Self::Aborted { .. } => TerminalState::Aborted,
            Self::Metadata(_) | Self::Begin(_) | Self::ConnectionLost { .. } | Self::Commit(_) => {
                TerminalState::Fatal
            }
        }
    }
}
