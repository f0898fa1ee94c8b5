//! Temporal SQL types, statement strategies, and terminal run states.
//!
//! All enums provide `as_str()` returning the spelling used in SQL metadata,
//! configuration files, and JSON reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// TemporalType
// ---------------------------------------------------------------------------

/// Declared column type eligible for `CONVERT_TZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalType {
    Date,
    Datetime,
    Timestamp,
}

impl TemporalType {
    /// Every convertible type, in the order used by the metadata query.
    pub const ALL: [Self; 3] = [Self::Datetime, Self::Date, Self::Timestamp];

    /// Return the `information_schema.columns.data_type` spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for TemporalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemporalType {
    type Err = CoreError;

    /// Parse a `data_type` value. MySQL reports lowercase, but older servers
    /// and some proxies uppercase it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "datetime" => Ok(Self::Datetime),
            "timestamp" => Ok(Self::Timestamp),
            _ => Err(CoreError::UnsupportedType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// How UPDATE statements are generated for a table.
///
/// ```text
/// combined   → one UPDATE per table, every temporal column in one SET list
/// per-column → one UPDATE per column, guarded by `IS NOT NULL` when nullable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Combined,
    PerColumn,
}

impl Strategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Combined => "combined",
            Self::PerColumn => "per-column",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TerminalState
// ---------------------------------------------------------------------------

/// Where a conversion run ended.
///
/// ```text
/// init → per-table → finalize → completed
///            ↓           ↓
///         aborted      fatal
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalState {
    /// Every statement was attempted and the unit of work (if any) committed.
    Completed,
    /// Halt-on-error stopped the batch and the transaction was rolled back.
    Aborted,
    /// Connection loss or commit failure.
    Fatal,
}

impl TerminalState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Aborted => "aborted",
            Self::Fatal => "fatal",
        }
    }

    /// Process exit status for this state.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Completed => 0,
            Self::Aborted | Self::Fatal => 1,
        }
    }
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
