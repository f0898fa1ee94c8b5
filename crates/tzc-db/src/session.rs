//! Statement execution and transaction control.
//!
//! `StatementSession` is the only write path into the database. The executor
//! owns one session for the whole run and drives BEGIN / UPDATE / COMMIT or
//! ROLLBACK through it, strictly one call at a time.

use crate::TzcDb;
use crate::error::DatabaseError;
use crate::helpers::{exec_error, transaction_error};

/// SQL text plus the string parameters bound to its `?` placeholders, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<String>,
}

impl Statement {
    #[must_use]
    pub const fn new(sql: String, params: Vec<String>) -> Self {
        Self { sql, params }
    }
}

/// Write-side database boundary.
#[allow(async_fn_in_trait)]
pub trait StatementSession {
    /// Open a transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if one is already open.
    async fn begin(&mut self) -> Result<(), DatabaseError>;

    /// Execute one statement and return the affected row count.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Exec` if the server rejects the statement and
    /// `DatabaseError::Connection` if the connection is lost.
    async fn execute(&mut self, statement: &Statement) -> Result<u64, DatabaseError>;

    /// Commit the open transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` without an open transaction, and
    /// `DatabaseError::Transaction` / `Connection` if the commit fails.
    async fn commit(&mut self) -> Result<(), DatabaseError>;

    /// Roll back the open transaction.
    ///
    /// # Errors
    ///
    /// Same as [`Self::commit`].
    async fn rollback(&mut self) -> Result<(), DatabaseError>;
}

impl StatementSession for TzcDb {
    async fn begin(&mut self) -> Result<(), DatabaseError> {
        if self.in_transaction {
            return Err(DatabaseError::InvalidState(
                "transaction already open".into(),
            ));
        }
        sqlx::raw_sql("START TRANSACTION")
            .execute(self.conn_mut())
            .await
            .map_err(transaction_error)?;
        self.in_transaction = true;
        tracing::debug!("transaction started");
        Ok(())
    }

    async fn execute(&mut self, statement: &Statement) -> Result<u64, DatabaseError> {
        let mut query = sqlx::query(&statement.sql);
        for param in &statement.params {
            query = query.bind(param.as_str());
        }
        let result = query.execute(self.conn_mut()).await.map_err(exec_error)?;
        Ok(result.rows_affected())
    }

    async fn commit(&mut self) -> Result<(), DatabaseError> {
        self.end_transaction("COMMIT").await
    }

    async fn rollback(&mut self) -> Result<(), DatabaseError> {
        self.end_transaction("ROLLBACK").await
    }
}

impl TzcDb {
    async fn end_transaction(&mut self, verb: &'static str) -> Result<(), DatabaseError> {
        if !self.in_transaction {
            return Err(DatabaseError::InvalidState(format!(
                "{verb} without an open transaction"
            )));
        }
        // Cleared before the round trip: a failed COMMIT or ROLLBACK leaves
        // nothing that could be ended a second time.
        self.in_transaction = false;
        sqlx::raw_sql(verb)
            .execute(self.conn_mut())
            .await
            .map_err(transaction_error)?;
        tracing::debug!(verb, "transaction ended");
        Ok(())
    }
}

/// Session that logs statements instead of running them.
///
/// Used by `--dry-run`. Every statement "affects" zero rows and transaction
/// control is accepted but does nothing.
#[derive(Debug, Default)]
pub struct DryRunSession {
    executed: Vec<Statement>,
}

impl DryRunSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements seen so far, in order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.executed
    }
}

impl StatementSession for DryRunSession {
    async fn begin(&mut self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn execute(&mut self, statement: &Statement) -> Result<u64, DatabaseError> {
        tracing::info!(sql = %statement.sql, params = ?statement.params, "dry run");
        self.executed.push(statement.clone());
        Ok(0)
    }

    async fn commit(&mut self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
