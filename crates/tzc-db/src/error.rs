//! Database error types for tzc-db.

use thiserror::Error;

/// Errors from the MySQL boundary.
///
/// The variant decides how the executor reacts: `Exec` is local to one
/// statement, everything else compromises the whole run.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The server could not be reached, or the connection dropped mid-run.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The metadata query failed (e.g. no privilege on `information_schema`).
    #[error("Query failed: {0}")]
    Query(String),

    /// An UPDATE statement was rejected by the server.
    #[error("Statement failed: {0}")]
    Exec(String),

    /// BEGIN, COMMIT or ROLLBACK failed.
    #[error("Transaction control failed: {0}")]
    Transaction(String),

    /// Transaction control called out of order (e.g. commit without begin).
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl DatabaseError {
    /// Whether the connection itself is gone, as opposed to one statement failing.
    #[must_use]
    pub const fn is_connection_loss(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
