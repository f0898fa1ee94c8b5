use serde::{Deserialize, Serialize};

use super::TemporalColumn;

/// A table and the temporal columns it owns, in metadata order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableGroup {
    pub table_name: String,
    pub columns: Vec<TemporalColumn>,
}

impl TableGroup {
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    /// Column names in order, for log lines and outcomes.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.column_name.clone()).collect()
    }
}
