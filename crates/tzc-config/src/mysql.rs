//! MySQL connection configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default MySQL port.
const fn default_port() -> u16 {
    3306
}

/// Default connect timeout in seconds.
const fn default_connect_timeout_secs() -> u64 {
    10
}

#[derive(Clone, Deserialize, Serialize)]
pub struct MySqlConfig {
    /// Server host name or address.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Account used for both the metadata query and the updates.
    /// Needs SELECT on `information_schema` and UPDATE on the target schema.
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub password: String,

    /// Upper bound on establishing the connection, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for MySqlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: String::new(),
            password: String::new(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

// Hand-written so the password never lands in debug logs.
impl std::fmt::Debug for MySqlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl MySqlConfig {
    /// Whether an account was configured. An empty user is still sent to the
    /// server as-is, so this only drives config warnings.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.user.is_empty()
    }

    /// `host:port`, for log lines.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject values that cannot produce a usable connection.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` if the host is empty and
    /// `ConfigError::InvalidValue` for a zero port or timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "mysql".into(),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "mysql.port".into(),
                reason: "port must be non-zero".into(),
            });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "mysql.connect_timeout_secs".into(),
                reason: "timeout must be at least one second".into(),
            });
        }
        Ok(())
    }
}
