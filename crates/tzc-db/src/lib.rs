//! # tzc-db
//!
//! MySQL access for mysql-tz-converter.
//!
//! Two thin boundaries sit on one connection:
//! - [`MetadataRepository`] reads `information_schema.columns`
//! - [`StatementSession`] runs the UPDATE statements and transaction control
//!
//! Uses `sqlx` with the MySQL driver and a single owned connection; there is
//! no pool because the run is strictly sequential.

pub mod error;
pub mod helpers;
pub mod metadata;
pub mod session;

use std::time::Duration;

use error::DatabaseError;
use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use tzc_config::MySqlConfig;

pub use metadata::{MetadataRepository, TEMPORAL_COLUMNS_SQL};
pub use session::{DryRunSession, Statement, StatementSession};

/// Database the connection lands in. Updates always qualify the target schema.
const DEFAULT_DATABASE: &str = "information_schema";

/// Central database handle for a conversion run.
///
/// Wraps exactly one MySQL connection and tracks whether a transaction is
/// open on it.
pub struct TzcDb {
    conn: MySqlConnection,
    in_transaction: bool,
}

impl TzcDb {
    /// Connect using the `[mysql]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the server is unreachable,
    /// rejects the credentials, or does not answer within the timeout.
    pub async fn connect(config: &MySqlConfig) -> Result<Self, DatabaseError> {
        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .database(DEFAULT_DATABASE);
        if !config.password.is_empty() {
            options = options.password(&config.password);
        }

        tracing::info!(endpoint = %config.endpoint(), user = %config.user, "connecting to MySQL");
        Self::connect_with(&options, Duration::from_secs(config.connect_timeout_secs)).await
    }

    /// Connect with explicit options (tests use a URL-derived set).
    ///
    /// # Errors
    ///
    /// Same as [`Self::connect`].
    pub async fn connect_with(
        options: &MySqlConnectOptions,
        timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let conn = tokio::time::timeout(timeout, MySqlConnection::connect_with(options))
            .await
            .map_err(|_| {
                DatabaseError::Connection(format!(
                    "timed out after {}s",
                    timeout.as_secs()
                ))
            })?
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        Ok(Self {
            conn,
            in_transaction: false,
        })
    }

    /// Access the underlying connection for direct queries.
    pub const fn conn_mut(&mut self) -> &mut MySqlConnection {
        &mut self.conn
    }

    /// Returns whether a transaction is currently open.
    #[must_use]
    pub const fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    /// Close the connection gracefully.
    ///
    /// An open transaction at this point is a caller bug; MySQL rolls it back
    /// when the session ends, and the close is logged as a warning.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the close handshake fails.
    pub async fn close(self) -> Result<(), DatabaseError> {
        if self.in_transaction {
            tracing::warn!("closing connection with an open transaction; server will roll back");
        }
        self.conn
            .close()
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))
    }
}
