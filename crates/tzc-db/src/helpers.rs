//! Row parsing and error classification helpers.
//!
//! `information_schema` reports nullability as `'YES'`/`'NO'` text, and sqlx
//! surfaces every failure as one `sqlx::Error`. These helpers turn both into
//! the typed values the rest of the crate works with.

use tzc_core::entities::TemporalColumn;

use crate::error::DatabaseError;

/// Detect errors meaning the connection is unusable.
///
/// The predicate is intentionally narrow: server-side SQL errors (constraint
/// violations, bad values, missing privileges) are `Database` errors and stay
/// local to the statement that caused them.
pub fn is_connection_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

/// Classify a failure of the metadata query.
pub fn query_error(e: sqlx::Error) -> DatabaseError {
    if is_connection_error(&e) {
        DatabaseError::Connection(e.to_string())
    } else {
        DatabaseError::Query(e.to_string())
    }
}

/// Classify a failure of an UPDATE statement.
pub fn exec_error(e: sqlx::Error) -> DatabaseError {
    if is_connection_error(&e) {
        DatabaseError::Connection(e.to_string())
    } else {
        DatabaseError::Exec(e.to_string())
    }
}

/// Classify a failure of BEGIN / COMMIT / ROLLBACK.
pub fn transaction_error(e: sqlx::Error) -> DatabaseError {
    if is_connection_error(&e) {
        DatabaseError::Connection(e.to_string())
    } else {
        DatabaseError::Transaction(e.to_string())
    }
}

/// Parse `information_schema.columns.is_nullable`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for anything other than `YES` or `NO`.
pub fn parse_is_nullable(s: &str) -> Result<bool, DatabaseError> {
    match s.trim() {
        v if v.eq_ignore_ascii_case("yes") => Ok(true),
        v if v.eq_ignore_ascii_case("no") => Ok(false),
        other => Err(DatabaseError::Query(format!(
            "Unexpected is_nullable value '{other}'"
        ))),
    }
}

/// Build a `TemporalColumn` from the four text fields of a metadata row.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if any field is malformed or the type is
/// outside the temporal filter.
pub fn column_from_fields(
    table_name: String,
    column_name: String,
    data_type: &str,
    is_nullable: &str,
) -> Result<TemporalColumn, DatabaseError> {
    let nullable = parse_is_nullable(is_nullable)?;
    TemporalColumn::from_metadata_row(table_name, column_name, data_type, nullable)
        .map_err(|e| DatabaseError::Query(format!("Malformed metadata row: {e}")))
}
