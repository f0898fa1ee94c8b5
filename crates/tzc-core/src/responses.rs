//! Run report returned by the executor and printed by `--format json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::ConversionOutcome;
use crate::enums::{Strategy, TerminalState};

/// Everything a finished run has to say about itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunReport {
    pub schema: String,
    pub from_tz: String,
    pub to_tz: String,
    pub strategy: Strategy,
    pub transactional: bool,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub state: TerminalState,
    /// Why the run stopped early, for `Aborted` and `Fatal`.
    pub error: Option<String>,
    /// A transaction was opened and never committed: the writes of every
    /// successful outcome were discarded by the server.
    #[serde(default)]
    pub rolled_back: bool,
    pub outcomes: Vec<ConversionOutcome>,
}

/// Aggregate counts over a run's outcomes.
///
/// `rows_affected` counts rows that are in the database after the run;
/// rows converted inside a transaction that was not committed go to
/// `rows_discarded` instead.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    pub tables: usize,
    pub statements: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub rows_affected: u64,
    pub rows_discarded: u64,
}

/// Outcomes of one table, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableReport {
    pub table_name: String,
    pub outcomes: Vec<ConversionOutcome>,
}

impl RunReport {
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let succeeded = self.outcomes.iter().filter(|o| o.is_success()).count();
        let rows: u64 = self.outcomes.iter().map(ConversionOutcome::rows_affected).sum();
        let (rows_affected, rows_discarded) = if self.rolled_back {
            (0, rows)
        } else {
            (rows, 0)
        };
        RunSummary {
            tables: self.per_table().len(),
            statements: self.outcomes.len(),
            succeeded,
            failed: self.outcomes.len() - succeeded,
            rows_affected,
            rows_discarded,
        }
    }

    /// Outcomes grouped by table, tables in first-attempted order.
    #[must_use]
    pub fn per_table(&self) -> Vec<TableReport> {
        let mut tables: Vec<TableReport> = Vec::new();
        for outcome in &self.outcomes {
            match tables.last_mut() {
                Some(last) if last.table_name == outcome.table_name => {
                    last.outcomes.push(outcome.clone());
                }
                _ => tables.push(TableReport {
                    table_name: outcome.table_name.clone(),
                    outcomes: vec![outcome.clone()],
                }),
            }
        }
        tables
    }
}
