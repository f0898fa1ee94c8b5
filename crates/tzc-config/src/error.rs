//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error (bad TOML, wrong env value type).
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// The `[mysql]` section lacks fields needed to connect.
    #[error("Configuration section '{section}' is not configured (missing required fields)")]
    NotConfigured { section: String },

    /// A configuration field has an out-of-range value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
