use clap::ValueEnum;
use tzc_core::enums::Strategy;

/// How the final run report is printed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Log lines only.
    #[default]
    Text,
    /// Pretty JSON report on stdout.
    Json,
}

/// `--strategy` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    Combined,
    PerColumn,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Combined => Self::Combined,
            StrategyArg::PerColumn => Self::PerColumn,
        }
    }
}

/// Presentation flags shared by `main` and the command handler.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}
