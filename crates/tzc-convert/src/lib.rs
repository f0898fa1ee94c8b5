//! # tzc-convert
//!
//! Schema-driven batch conversion engine.
//!
//! A run is two phases on the database boundaries from `tzc-db`:
//! 1. [`discover`]: read the temporal columns of the schema and group them by table
//! 2. [`ConversionExecutor::run`]: build and submit the UPDATE statements,
//!    applying the halt-on-error and transaction policy from the `RunContext`
//!
//! [`convert_schema`] chains both when one handle serves metadata and writes.

pub mod builder;
pub mod error;
pub mod executor;
pub mod grouper;
pub mod report;

pub use builder::{PlannedStatement, StatementBuilder};
pub use error::{BuildError, ConvertError};
pub use executor::ConversionExecutor;
pub use grouper::group_by_table;
pub use report::{ReportSink, TracingReportSink};

use tzc_core::entities::TableGroup;
use tzc_core::responses::RunReport;
use tzc_core::run::RunContext;
use tzc_db::{MetadataRepository, StatementSession};

/// Fetch and group the temporal columns of `schema`.
///
/// # Errors
///
/// Returns `ConvertError::Metadata` if the metadata query fails. Nothing has
/// been written at that point.
pub async fn discover<R: MetadataRepository>(
    repo: &mut R,
    schema: &str,
) -> Result<Vec<TableGroup>, ConvertError> {
    let columns = repo
        .fetch_temporal_columns(schema)
        .await
        .map_err(ConvertError::Metadata)?;
    Ok(group_by_table(columns))
}

/// Discover and convert in one call.
///
/// # Errors
///
/// Returns `ConvertError::Metadata` if discovery fails. Failures during the
/// batch are reported in the returned `RunReport` instead.
pub async fn convert_schema<D, K>(
    ctx: &RunContext,
    db: &mut D,
    sink: &mut K,
) -> Result<RunReport, ConvertError>
where
    D: MetadataRepository + StatementSession,
    K: ReportSink,
{
    let groups = discover(db, &ctx.schema).await?;
    Ok(ConversionExecutor::new(ctx, db, sink).run(&groups).await)
}
