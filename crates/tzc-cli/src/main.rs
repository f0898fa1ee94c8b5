use clap::Parser;
use clap::error::ErrorKind;

mod bootstrap;
mod cli;
mod commands;
mod config_warnings;
mod output;

#[tokio::main]
async fn main() {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let code = match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = error.print();
            std::process::exit(code);
        }
    };

    match run(&cli).await {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("mysql-tz-converter error: {error:#}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: &cli::Cli) -> anyhow::Result<i32> {
    let flags = cli.global_flags();
    init_tracing(flags.quiet, flags.verbose)?;
    print_banner(&flags);

    let config = bootstrap::load_config(cli)?;
    config_warnings::warn_unconfigured(&config);
    let ctx = bootstrap::run_context(cli, &config)?;

    let state = commands::convert::handle(&ctx, &config, &flags).await?;
    Ok(state.exit_code())
}

fn print_banner(flags: &cli::GlobalFlags) {
    if flags.quiet || flags.format == cli::OutputFormat::Json {
        return;
    }
    println!("mysql-tz-converter {}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TZC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
