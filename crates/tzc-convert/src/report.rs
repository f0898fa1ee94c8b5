//! Run progress reporting.
//!
//! The executor tells a [`ReportSink`] about every step; the sink decides how
//! to present it. [`TracingReportSink`] writes the familiar line-per-event log
//! through `tracing`.

use tzc_core::entities::{ConversionOutcome, OutcomeStatus, TableGroup};
use tzc_core::responses::RunReport;
use tzc_core::run::RunContext;

use crate::error::ConvertError;
use crate::grouper::column_count;

/// Observer of a conversion run. Called in order, from one task.
pub trait ReportSink {
    fn run_started(&mut self, ctx: &RunContext, groups: &[TableGroup]);
    fn table_started(&mut self, group: &TableGroup);
    fn outcome(&mut self, outcome: &ConversionOutcome);
    /// Terminal failure: the batch was aborted or hit a fatal error.
    fn run_failed(&mut self, error: &ConvertError);
    fn run_finished(&mut self, report: &RunReport);
}

/// Logs run events with `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReportSink;

impl ReportSink for TracingReportSink {
    fn run_started(&mut self, ctx: &RunContext, groups: &[TableGroup]) {
        tracing::info!(
            schema = %ctx.schema,
            columns = column_count(groups),
            tables = groups.len(),
            "Found {} columns in {} tables.",
            column_count(groups),
            groups.len()
        );
        tracing::info!(
            from_tz = %ctx.from_tz,
            to_tz = %ctx.to_tz,
            strategy = %ctx.strategy,
            transactional = ctx.transactional,
            halt_on_error = ctx.halt_on_error,
            dry_run = ctx.dry_run,
            "Will convert from {} to {}.",
            ctx.from_tz,
            ctx.to_tz
        );
    }

    fn table_started(&mut self, group: &TableGroup) {
        tracing::info!("---");
        tracing::info!(table = %group.table_name, "Table:  {}", group.table_name);
        tracing::info!(
            table = %group.table_name,
            "Fields: {}",
            group.column_names().join(", ")
        );
    }

    fn outcome(&mut self, outcome: &ConversionOutcome) {
        match &outcome.status {
            OutcomeStatus::Success { rows_affected } => tracing::info!(
                target_columns = %outcome.target(),
                rows_affected,
                "DONE. ({rows_affected} rows)"
            ),
            OutcomeStatus::Failure { message } => tracing::warn!(
                target_columns = %outcome.target(),
                error = %message,
                "FAILED. ({message})"
            ),
        }
    }

    fn run_failed(&mut self, error: &ConvertError) {
        tracing::error!(state = %error.terminal_state(), %error, "conversion stopped");
    }

    fn run_finished(&mut self, report: &RunReport) {
        let summary = report.summary();
        tracing::info!("---");
        tracing::info!(
            state = %report.state,
            elapsed_ms = report.elapsed_ms,
            tables = summary.tables,
            statements = summary.statements,
            succeeded = summary.succeeded,
            failed = summary.failed,
            rows_affected = summary.rows_affected,
            "Finished in {} ms: {} succeeded, {} failed, {} rows updated.",
            report.elapsed_ms,
            summary.succeeded,
            summary.failed,
            summary.rows_affected
        );
        if report.rolled_back {
            tracing::warn!(
                rows_discarded = summary.rows_discarded,
                "Transaction not committed: {} converted rows were rolled back.",
                summary.rows_discarded
            );
        }
        for table in report.per_table() {
            let failed = table.outcomes.iter().filter(|o| !o.is_success()).count();
            tracing::debug!(
                table = %table.table_name,
                statements = table.outcomes.len(),
                failed,
                "table summary"
            );
        }
    }
}
