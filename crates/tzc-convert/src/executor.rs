//! Batch execution with the configured failure policy.
//!
//! One pass, no retries, one statement in flight at a time:
//!
//! ```text
//! init ──▶ per-table ──▶ finalize ──▶ completed
//!  │          │   │          │
//!  │          │   └─ halt ───┼──▶ aborted (rolled back)
//!  └──────────┴──────────────┴──▶ fatal   (begin / connection / commit)
//! ```
//!
//! The transaction, when one is opened, is ended exactly once: committed at
//! finalize, or rolled back on the abort and connection-loss paths.

use std::time::Instant;

use chrono::Utc;
use tzc_core::entities::{ConversionOutcome, TableGroup};
use tzc_core::enums::TerminalState;
use tzc_core::responses::RunReport;
use tzc_core::run::RunContext;
use tzc_db::StatementSession;
use tzc_db::error::DatabaseError;

use crate::builder::{PlannedStatement, StatementBuilder};
use crate::error::ConvertError;
use crate::report::ReportSink;

/// Why a single statement produced a failure outcome.
enum StatementFailure {
    Local(String),
    ConnectionLost(DatabaseError),
}

pub struct ConversionExecutor<'a, S, K> {
    ctx: &'a RunContext,
    session: &'a mut S,
    sink: &'a mut K,
    outcomes: Vec<ConversionOutcome>,
    opened: bool,
    committed: bool,
}

impl<'a, S: StatementSession, K: ReportSink> ConversionExecutor<'a, S, K> {
    pub const fn new(ctx: &'a RunContext, session: &'a mut S, sink: &'a mut K) -> Self {
        Self {
            ctx,
            session,
            sink,
            outcomes: Vec::new(),
            opened: false,
            committed: false,
        }
    }

    /// Convert every table in `groups`, in order.
    ///
    /// Never fails: aborted and fatal runs are reported through the returned
    /// report's `state` and `error`, with every outcome recorded up to the stop.
    pub async fn run(mut self, groups: &[TableGroup]) -> RunReport {
        let started_at = Utc::now();
        let clock = Instant::now();

        self.sink.run_started(self.ctx, groups);
        let result = self.run_batch(groups).await;

        let (state, error) = match result {
            Ok(()) => (TerminalState::Completed, None),
            Err(error) => {
                self.sink.run_failed(&error);
                (error.terminal_state(), Some(error.to_string()))
            }
        };

        let report = RunReport {
            schema: self.ctx.schema.clone(),
            from_tz: self.ctx.from_tz.clone(),
            to_tz: self.ctx.to_tz.clone(),
            strategy: self.ctx.strategy,
            transactional: self.ctx.transactional,
            dry_run: self.ctx.dry_run,
            started_at,
            elapsed_ms: u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX),
            state,
            error,
            rolled_back: self.opened && !self.committed,
            outcomes: self.outcomes,
        };
        self.sink.run_finished(&report);
        report
    }

    async fn run_batch(&mut self, groups: &[TableGroup]) -> Result<(), ConvertError> {
        let ctx = self.ctx;

        if ctx.transactional {
            self.session.begin().await.map_err(ConvertError::Begin)?;
            self.opened = true;
        }

        let builder = StatementBuilder::new(ctx);
        for group in groups {
            self.sink.table_started(group);
            for planned in builder.plan(ctx.strategy, group) {
                self.apply(planned).await?;
            }
        }

        if ctx.transactional {
            self.session.commit().await.map_err(ConvertError::Commit)?;
            self.committed = true;
        }

        Ok(())
    }

    /// Submit one planned statement and record its outcome.
    ///
    /// Returns an error only when the batch must stop.
    async fn apply(&mut self, planned: PlannedStatement) -> Result<(), ConvertError> {
        let PlannedStatement {
            table_name,
            columns,
            statement,
        } = planned;

        let result = match statement {
            Err(build) => Err(StatementFailure::Local(build.to_string())),
            Ok(statement) => {
                tracing::debug!(sql = %statement.sql, "executing");
                match self.session.execute(&statement).await {
                    Ok(rows) => Ok(rows),
                    Err(e) if e.is_connection_loss() => Err(StatementFailure::ConnectionLost(e)),
                    Err(e) => Err(StatementFailure::Local(e.to_string())),
                }
            }
        };

        let failure = match result {
            Ok(rows) => {
                self.record(ConversionOutcome::success(&table_name, columns, rows));
                return Ok(());
            }
            Err(failure) => failure,
        };

        match failure {
            StatementFailure::ConnectionLost(source) => {
                let outcome = ConversionOutcome::failure(&table_name, columns, source.to_string());
                let target = outcome.target();
                self.record(outcome);
                self.roll_back().await;
                Err(ConvertError::ConnectionLost { target, source })
            }
            StatementFailure::Local(message) => {
                let outcome = ConversionOutcome::failure(&table_name, columns, message.clone());
                let target = outcome.target();
                self.record(outcome);
                if !self.ctx.halt_on_error {
                    return Ok(());
                }
                self.roll_back().await;
                Err(ConvertError::Aborted { target, message })
            }
        }
    }

    fn record(&mut self, outcome: ConversionOutcome) {
        self.sink.outcome(&outcome);
        self.outcomes.push(outcome);
    }

    /// End the open transaction after a failure.
    ///
    /// A failing ROLLBACK is only logged: the run is already ending, and the
    /// server discards the transaction when the connection closes.
    async fn roll_back(&mut self) {
        if !self.ctx.transactional {
            let committed = persisted_outcomes(self.ctx, &self.outcomes);
            if committed > 0 {
                tracing::warn!(
                    committed,
                    "no transaction in use; statements that already succeeded stay applied"
                );
            }
            return;
        }

        match self.session.rollback().await {
            Ok(()) => tracing::info!("transaction rolled back"),
            Err(error) => tracing::error!(%error, "rollback failed"),
        }
    }
}

/// Successful statements whose writes are already durable, i.e. autocommitted.
fn persisted_outcomes(ctx: &RunContext, outcomes: &[ConversionOutcome]) -> usize {
    if ctx.dry_run || ctx.transactional {
        return 0;
    }
    outcomes.iter().filter(|o| o.is_success()).count()
}
