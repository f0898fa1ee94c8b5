use clap::{ArgAction, Parser};

pub mod global;

pub use global::{GlobalFlags, OutputFormat, StrategyArg};

/// Top-level CLI parser for the `mysql-tz-converter` binary.
///
/// `-h` is the host, as with the MySQL client tools, so help lives on `-?`.
#[derive(Debug, Parser)]
#[command(
    name = "mysql-tz-converter",
    version,
    about = "Convert every DATE, DATETIME and TIMESTAMP column of a MySQL schema between timezones",
    disable_help_flag = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Schema whose temporal columns are converted
    #[arg(value_name = "DATABASE_NAME")]
    pub database: String,

    /// Timezone the stored values are in (e.g. +00:00 or Europe/Berlin)
    #[arg(value_name = "FROM_TZ")]
    pub from_tz: String,

    /// Timezone to convert the values to
    #[arg(value_name = "TO_TZ")]
    pub to_tz: String,

    /// MySQL host [default: 127.0.0.1]
    #[arg(short = 'h', long)]
    pub host: Option<String>,

    /// MySQL port [default: 3306]
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// MySQL user
    #[arg(short, long)]
    pub user: Option<String>,

    /// MySQL password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Stop at the first failed statement (and roll back when transactional)
    #[arg(long)]
    pub halt_on_error: bool,

    /// One UPDATE per table, or one per column
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Run every statement in one transaction
    #[arg(long, overrides_with = "no_transaction")]
    pub transactional: bool,

    /// Autocommit each statement
    #[arg(long, overrides_with = "transactional")]
    pub no_transaction: bool,

    /// Build and report every statement without executing it
    #[arg(long)]
    pub dry_run: bool,

    /// Report format: text, json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging, including statement text)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print help
    #[arg(short = '?', long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }

    /// `--transactional` / `--no-transaction`, whichever came last.
    #[must_use]
    pub const fn transactional(&self) -> Option<bool> {
        if self.transactional {
            Some(true)
        } else if self.no_transaction {
            Some(false)
        } else {
            None
        }
    }
}
