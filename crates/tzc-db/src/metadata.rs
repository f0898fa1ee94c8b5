//! Temporal column discovery through `information_schema.columns`.

use sqlx::Row;
use tzc_core::entities::TemporalColumn;

use crate::TzcDb;
use crate::error::DatabaseError;
use crate::helpers::{column_from_fields, query_error};

/// Every temporal column of one schema, ordered by table then column.
///
/// The `CAST`s keep MySQL 8 from returning the catalog's binary-collated
/// columns as bytes. Ordering uses the catalog columns themselves.
pub const TEMPORAL_COLUMNS_SQL: &str = "\
SELECT
  CAST(c.table_name AS CHAR) AS table_name,
  CAST(c.column_name AS CHAR) AS column_name,
  CAST(c.data_type AS CHAR) AS data_type,
  CAST(c.is_nullable AS CHAR) AS is_nullable
FROM
  information_schema.columns AS c
WHERE
  c.data_type IN ('datetime', 'date', 'timestamp')
  AND c.table_schema = ?
ORDER BY
  c.table_name ASC,
  c.column_name ASC";

/// Source of the columns a run converts.
#[allow(async_fn_in_trait)]
pub trait MetadataRepository {
    /// Fetch the temporal columns of `schema`, sorted by table then column.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the server is unreachable and
    /// `DatabaseError::Query` if the query or row decoding fails.
    async fn fetch_temporal_columns(
        &mut self,
        schema: &str,
    ) -> Result<Vec<TemporalColumn>, DatabaseError>;
}

impl MetadataRepository for TzcDb {
    async fn fetch_temporal_columns(
        &mut self,
        schema: &str,
    ) -> Result<Vec<TemporalColumn>, DatabaseError> {
        tracing::debug!(schema, "fetching temporal columns");

        let rows = sqlx::query(TEMPORAL_COLUMNS_SQL)
            .bind(schema)
            .fetch_all(self.conn_mut())
            .await
            .map_err(query_error)?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(column_from_fields(
                row.try_get::<String, _>("table_name").map_err(query_error)?,
                row.try_get::<String, _>("column_name").map_err(query_error)?,
                &row.try_get::<String, _>("data_type").map_err(query_error)?,
                &row.try_get::<String, _>("is_nullable").map_err(query_error)?,
            )?);
        }

        tracing::debug!(schema, count = columns.len(), "fetched temporal columns");
        Ok(columns)
    }
}
