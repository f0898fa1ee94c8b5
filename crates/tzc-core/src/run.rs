//! Process-scoped run configuration.
//!
//! `RunContext` is resolved once from command-line input and configuration,
//! then passed by reference to every component. Nothing mutates it.

use serde::{Deserialize, Serialize};

use crate::enums::Strategy;
use crate::errors::CoreError;
use crate::identifier::validate_identifier;

/// Execution knobs before defaults are resolved.
///
/// `transactional` and `strategy` are independent axes. When left unset they
/// follow `halt_on_error`: halting runs default to one transaction with
/// per-column statements, best-effort runs to autocommit with one combined
/// statement per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    #[serde(default)]
    pub halt_on_error: bool,
    #[serde(default)]
    pub transactional: Option<bool>,
    #[serde(default)]
    pub strategy: Option<Strategy>,
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub schema: String,
    pub from_tz: String,
    pub to_tz: String,
    pub halt_on_error: bool,
    pub transactional: bool,
    pub strategy: Strategy,
    pub dry_run: bool,
}

impl RunContext {
    /// Resolve a run context.
    ///
    /// Timezone names are opaque and passed through verbatim, empty or not;
    /// the server decides what they mean. Only the schema name is checked,
    /// since it is interpolated into statement text.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidIdentifier` if `schema` is not a safe
    /// identifier.
    pub fn new(
        schema: impl Into<String>,
        from_tz: impl Into<String>,
        to_tz: impl Into<String>,
        options: RunOptions,
    ) -> Result<Self, CoreError> {
        let schema = schema.into();
        validate_identifier(&schema)?;

        let strategy = options.strategy.unwrap_or(if options.halt_on_error {
            Strategy::PerColumn
        } else {
            Strategy::Combined
        });

        Ok(Self {
            schema,
            from_tz: from_tz.into(),
            to_tz: to_tz.into(),
            halt_on_error: options.halt_on_error,
            transactional: !options.dry_run
                && options.transactional.unwrap_or(options.halt_on_error),
            strategy,
            dry_run: options.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn best_effort_defaults_to_autocommit_combined() {
        let ctx = RunContext::new("shop", "+00:00", "+02:00", RunOptions::default()).unwrap();
        assert!(!ctx.halt_on_error);
        assert!(!ctx.transactional);
        assert_eq!(ctx.strategy, Strategy::Combined);
    }

    #[test]
    fn halt_on_error_defaults_to_transactional_per_column() {
        let options = RunOptions {
            halt_on_error: true,
            ..RunOptions::default()
        };
        let ctx = RunContext::new("shop", "UTC", "Europe/Zurich", options).unwrap();
        assert!(ctx.transactional);
        assert_eq!(ctx.strategy, Strategy::PerColumn);
    }

    #[test]
    fn axes_are_independently_overridable() {
        let options = RunOptions {
            halt_on_error: false,
            transactional: Some(true),
            strategy: Some(Strategy::PerColumn),
            dry_run: false,
        };
        let ctx = RunContext::new("shop", "UTC", "UTC", options).unwrap();
        assert!(!ctx.halt_on_error);
        assert!(ctx.transactional);
        assert_eq!(ctx.strategy, Strategy::PerColumn);
    }

    #[test]
    fn dry_run_never_opens_a_transaction() {
        let options = RunOptions {
            halt_on_error: true,
            transactional: Some(true),
            dry_run: true,
            ..RunOptions::default()
        };
        let ctx = RunContext::new("shop", "UTC", "UTC", options).unwrap();
        assert!(!ctx.transactional);
    }

    #[test]
    fn timezones_pass_through_verbatim() {
        let ctx = RunContext::new("shop", " weird'tz ", "Europe/Berlin", RunOptions::default())
            .unwrap();
        assert_eq!(ctx.from_tz, " weird'tz ");
        assert_eq!(ctx.to_tz, "Europe/Berlin");
    }

    #[test]
    fn rejects_unsafe_schema_name() {
        let err = RunContext::new("shop; DROP", "UTC", "UTC", RunOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidIdentifier { .. }));
    }

    #[test]
    fn empty_timezones_are_not_validated() {
        let ctx = RunContext::new("shop", "", " ", RunOptions::default()).unwrap();
        assert_eq!(ctx.from_tz, "");
        assert_eq!(ctx.to_tz, " ");
    }
}
