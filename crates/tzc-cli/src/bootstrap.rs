use anyhow::Context;
use tzc_config::TzcConfig;
use tzc_core::run::RunContext;

use crate::cli::Cli;

/// Load layered configuration (with `.env`) and apply command-line overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<TzcConfig> {
    let mut config = TzcConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(&mut config, cli);
    Ok(config)
}

/// Command-line flags are the top layer.
fn apply_overrides(config: &mut TzcConfig, cli: &Cli) {
    if let Some(host) = &cli.host {
        config.mysql.host.clone_from(host);
    }
    if let Some(port) = cli.port {
        config.mysql.port = port;
    }
    if let Some(user) = &cli.user {
        config.mysql.user.clone_from(user);
    }
    if let Some(password) = &cli.password {
        config.mysql.password.clone_from(password);
    }
    if cli.halt_on_error {
        config.run.halt_on_error = true;
    }
    if let Some(transactional) = cli.transactional() {
        config.run.transactional = Some(transactional);
    }
    if let Some(strategy) = cli.strategy {
        config.run.strategy = Some(strategy.into());
    }
}

/// Resolve the run context from the positional arguments and run settings.
pub fn run_context(cli: &Cli, config: &TzcConfig) -> anyhow::Result<RunContext> {
    let mut options = config.run.to_options();
    options.dry_run = cli.dry_run;
    RunContext::new(&cli.database, &cli.from_tz, &cli.to_tz, options)
        .context("invalid arguments")
}
