//! Cross-cutting error types for mysql-tz-converter.
//!
//! This module defines errors that can originate from any crate in the system.
//! Domain-specific errors (e.g., `DatabaseError`, `BuildError`) are defined in
//! their respective crates. All errors converge in `tzc-cli` via `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any converter crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier is not safe to interpolate into SQL text.
    #[error("Invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    /// A metadata row reported a type outside the convertible temporal types.
    #[error("Unsupported temporal type: {0}")]
    UnsupportedType(String),

    /// Data failed validation (empty fields, bad run options).
    #[error("Validation error: {0}")]
    Validation(String),
}
