use serde::{Deserialize, Serialize};

/// Result of one attempted statement.
///
/// Per-column statements carry exactly one column; a combined statement
/// carries every column of its table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub table_name: String,
    pub columns: Vec<String>,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success { rows_affected: u64 },
    Failure { message: String },
}

impl ConversionOutcome {
    #[must_use]
    pub fn success(table_name: &str, columns: Vec<String>, rows_affected: u64) -> Self {
        Self {
            table_name: table_name.to_string(),
            columns,
            status: OutcomeStatus::Success { rows_affected },
        }
    }

    #[must_use]
    pub fn failure(table_name: &str, columns: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            table_name: table_name.to_string(),
            columns,
            status: OutcomeStatus::Failure {
                message: message.into(),
            },
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success { .. })
    }

    /// Rows touched, zero for failures.
    #[must_use]
    pub const fn rows_affected(&self) -> u64 {
        match self.status {
            OutcomeStatus::Success { rows_affected } => rows_affected,
            OutcomeStatus::Failure { .. } => 0,
        }
    }

    /// `table.column` for one column, `table.(a, b)` for several.
    #[must_use]
    pub fn target(&self) -> String {
        match self.columns.as_slice() {
            [single] => format!("{}.{single}", self.table_name),
            many => format!("{}.({})", self.table_name, many.join(", ")),
        }
    }
}
