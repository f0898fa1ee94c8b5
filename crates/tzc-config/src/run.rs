//! Execution-policy defaults.

use serde::{Deserialize, Serialize};
use tzc_core::enums::Strategy;
use tzc_core::run::RunOptions;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RunConfig {
    /// Stop at the first failed statement and roll back.
    #[serde(default)]
    pub halt_on_error: bool,

    /// Wrap the batch in one transaction. Unset follows `halt_on_error`.
    #[serde(default)]
    pub transactional: Option<bool>,

    /// `combined` or `per-column`. Unset follows `halt_on_error`.
    #[serde(default)]
    pub strategy: Option<Strategy>,
}

impl RunConfig {
    /// Seed run options from configuration; CLI flags are layered on top.
    #[must_use]
    pub const fn to_options(&self) -> RunOptions {
        RunOptions {
            halt_on_error: self.halt_on_error,
            transactional: self.transactional,
            strategy: self.strategy,
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_best_effort() {
        let config = RunConfig::default();
        assert!(!config.halt_on_error);
        assert_eq!(config.transactional, None);
        assert_eq!(config.strategy, None);
        assert_eq!(config.to_options(), RunOptions::default());
    }
}
