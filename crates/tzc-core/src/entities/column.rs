use serde::{Deserialize, Serialize};

use crate::enums::TemporalType;
use crate::errors::CoreError;

/// One schema column eligible for timezone conversion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemporalColumn {
    pub table_name: String,
    pub column_name: String,
    pub data_type: TemporalType,
    pub is_nullable: bool,
}

impl TemporalColumn {
    /// Build a column from the raw fields of one metadata row.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the table or column name is empty and
    /// `CoreError::UnsupportedType` if `data_type` is not date, datetime, or
    /// timestamp.
    pub fn from_metadata_row(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_type: &str,
        is_nullable: bool,
    ) -> Result<Self, CoreError> {
        let table_name = table_name.into();
        let column_name = column_name.into();

        if table_name.is_empty() {
            return Err(CoreError::Validation(
                "metadata row has an empty table name".into(),
            ));
        }
        if column_name.is_empty() {
            return Err(CoreError::Validation(format!(
                "metadata row for table '{table_name}' has an empty column name"
            )));
        }

        Ok(Self {
            table_name,
            column_name,
            data_type: data_type.parse()?,
            is_nullable,
        })
    }
}
