//! Shared fakes for executor integration tests.
//!
//! `FakeDb` models a catalog of all columns (temporal or not) and applies the
//! same filter and ordering as the real metadata query. Writes go to a pending
//! buffer that only becomes visible on commit, or immediately in autocommit.

#![allow(dead_code)]

use tzc_convert::{ConvertError, ReportSink};
use tzc_core::entities::{ConversionOutcome, TableGroup, TemporalColumn};
use tzc_core::enums::TemporalType;
use tzc_core::responses::RunReport;
use tzc_core::run::RunContext;
use tzc_db::error::DatabaseError;
use tzc_db::{MetadataRepository, Statement, StatementSession};

/// One row of the fake `information_schema.columns`.
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub schema: String,
    pub table: String,
    pub column: String,
    pub data_type: String,
    pub nullable: bool,
}

pub fn row(schema: &str, table: &str, column: &str, data_type: &str, nullable: bool) -> CatalogRow {
    CatalogRow {
        schema: schema.into(),
        table: table.into(),
        column: column.into(),
        data_type: data_type.into(),
        nullable,
    }
}

/// The `shop` schema: two temporal columns among distractors, plus a
/// temporal column in another schema that must never be touched.
pub fn shop_catalog() -> Vec<CatalogRow> {
    vec![
        row("shop", "orders", "id", "int", false),
        row("shop", "orders", "placed_at", "datetime", true),
        row("shop", "orders", "total", "decimal", true),
        row("shop", "invoices", "id", "int", false),
        row("shop", "invoices", "issued_at", "timestamp", false),
        row("archive", "orders", "placed_at", "datetime", true),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin,
    Execute(String),
    Commit,
    Rollback,
}

#[derive(Default)]
pub struct FakeDb {
    pub catalog: Vec<CatalogRow>,
    pub events: Vec<Event>,
    /// Statements whose SQL contains one of these fragments fail with `Exec`.
    pub fail_on: Vec<String>,
    /// Statements whose SQL contains this fragment lose the connection.
    pub drop_connection_on: Option<String>,
    pub fail_metadata: bool,
    pub fail_begin: bool,
    pub fail_commit: bool,
    pub rows_per_statement: u64,
    in_transaction: bool,
    pending: Vec<Statement>,
    /// Writes that are durable (committed, or executed in autocommit).
    pub applied: Vec<Statement>,
}

impl FakeDb {
    pub fn new(catalog: Vec<CatalogRow>) -> Self {
        Self {
            catalog,
            rows_per_statement: 3,
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, fragment: &str) -> Self {
        self.fail_on.push(fragment.to_string());
        self
    }

    pub fn executed(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Execute(sql) => Some(sql.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of COMMIT + ROLLBACK calls.
    pub fn releases(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Commit | Event::Rollback))
            .count()
    }
}

impl MetadataRepository for FakeDb {
    async fn fetch_temporal_columns(
        &mut self,
        schema: &str,
    ) -> Result<Vec<TemporalColumn>, DatabaseError> {
        if self.fail_metadata {
            return Err(DatabaseError::Query(
                "SELECT command denied to user".into(),
            ));
        }

        let temporal: Vec<&str> = TemporalType::ALL.iter().map(|t| t.as_str()).collect();
        let mut rows: Vec<&CatalogRow> = self
            .catalog
            .iter()
            .filter(|r| r.schema == schema && temporal.contains(&r.data_type.as_str()))
            .collect();
        rows.sort_by(|a, b| (&a.table, &a.column).cmp(&(&b.table, &b.column)));

        rows.into_iter()
            .map(|r| {
                TemporalColumn::from_metadata_row(
                    r.table.clone(),
                    r.column.clone(),
                    &r.data_type,
                    r.nullable,
                )
                .map_err(|e| DatabaseError::Query(e.to_string()))
            })
            .collect()
    }
}

impl StatementSession for FakeDb {
    async fn begin(&mut self) -> Result<(), DatabaseError> {
        self.events.push(Event::Begin);
        if self.fail_begin {
            return Err(DatabaseError::Transaction("lock wait timeout".into()));
        }
        self.in_transaction = true;
        Ok(())
    }

    async fn execute(&mut self, statement: &Statement) -> Result<u64, DatabaseError> {
        self.events.push(Event::Execute(statement.sql.clone()));
        if let Some(fragment) = &self.drop_connection_on
            && statement.sql.contains(fragment.as_str())
        {
            return Err(DatabaseError::Connection("server has gone away".into()));
        }
        if self.fail_on.iter().any(|f| statement.sql.contains(f.as_str())) {
            return Err(DatabaseError::Exec("Incorrect datetime value".into()));
        }
        if self.in_transaction {
            self.pending.push(statement.clone());
        } else {
            self.applied.push(statement.clone());
        }
        Ok(self.rows_per_statement)
    }

    async fn commit(&mut self) -> Result<(), DatabaseError> {
        self.events.push(Event::Commit);
        if !self.in_transaction {
            return Err(DatabaseError::InvalidState("COMMIT without transaction".into()));
        }
        self.in_transaction = false;
        if self.fail_commit {
            self.pending.clear();
            return Err(DatabaseError::Transaction("Deadlock found".into()));
        }
        self.applied.append(&mut self.pending);
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DatabaseError> {
        self.events.push(Event::Rollback);
        if !self.in_transaction {
            return Err(DatabaseError::InvalidState("ROLLBACK without transaction".into()));
        }
        self.in_transaction = false;
        self.pending.clear();
        Ok(())
    }
}

/// Sink that remembers everything it was told.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub started: Option<(String, usize)>,
    pub tables: Vec<String>,
    pub outcomes: Vec<ConversionOutcome>,
    pub failures: Vec<String>,
    pub finished: Option<RunReport>,
}

impl ReportSink for RecordingSink {
    fn run_started(&mut self, ctx: &RunContext, groups: &[TableGroup]) {
        self.started = Some((ctx.schema.clone(), groups.len()));
    }

    fn table_started(&mut self, group: &TableGroup) {
        self.tables.push(group.table_name.clone());
    }

    fn outcome(&mut self, outcome: &ConversionOutcome) {
        self.outcomes.push(outcome.clone());
    }

    fn run_failed(&mut self, error: &ConvertError) {
        self.failures.push(error.to_string());
    }

    fn run_finished(&mut self, report: &RunReport) {
        self.finished = Some(report.clone());
    }
}
