//! # tzc-config
//!
//! Layered configuration loading for mysql-tz-converter using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Command-line flags (applied by `tzc-cli` on the extracted struct)
//! 2. Environment variables (`TZC_*` prefix, `__` as separator)
//! 3. Project-level `.tzc/config.toml`
//! 4. User-level `~/.config/tzc/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TZC_MYSQL__HOST` -> `mysql.host`, `TZC_RUN__HALT_ON_ERROR` -> `run.halt_on_error`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tzc_config::TzcConfig;
//!
//! let config = TzcConfig::load_with_dotenv().expect("config");
//!
//! if config.mysql.is_configured() {
//!     println!("MySQL at {}", config.mysql.endpoint());
//! }
//! ```

mod error;
mod mysql;
mod run;

pub use error::ConfigError;
pub use mysql::MySqlConfig;
pub use run::RunConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TZC_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TzcConfig {
    #[serde(default)]
    pub mysql: MySqlConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl TzcConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if present) before building
    /// the figment. This is the entry point used by the binary.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tzc/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tzc").join("config.toml"))
    }
}
