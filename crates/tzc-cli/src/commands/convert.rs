use anyhow::Context;
use tzc_config::TzcConfig;
use tzc_convert::{ConversionExecutor, TracingReportSink, convert_schema, discover};
use tzc_core::enums::TerminalState;
use tzc_core::responses::RunReport;
use tzc_core::run::RunContext;
use tzc_db::{DryRunSession, TzcDb};

use crate::cli::GlobalFlags;
use crate::output::output;

/// Connect, convert the schema, close the connection, print the report.
///
/// Returns the terminal state so `main` can pick the exit code. Errors are
/// the fatal cases that happen before a report exists: bad configuration,
/// connection failure, or a failed metadata query.
pub async fn handle(
    ctx: &RunContext,
    config: &TzcConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<TerminalState> {
    config
        .mysql
        .validate()
        .context("invalid MySQL connection settings")?;

    let mut db = TzcDb::connect(&config.mysql)
        .await
        .with_context(|| format!("cannot connect to MySQL at {}", config.mysql.endpoint()))?;

    let result = run(ctx, &mut db).await;

    if let Err(error) = db.close().await {
        tracing::warn!(%error, "failed to close MySQL connection");
    }

    let report = result.context("conversion failed before any statement was run")?;
    output(&report, flags.format)?;
    Ok(report.state)
}

async fn run(ctx: &RunContext, db: &mut TzcDb) -> Result<RunReport, tzc_convert::ConvertError> {
    let mut sink = TracingReportSink;

    if !ctx.dry_run {
        return convert_schema(ctx, db, &mut sink).await;
    }

    let groups = discover(db, &ctx.schema).await?;
    let mut session = DryRunSession::new();
    let report = ConversionExecutor::new(ctx, &mut session, &mut sink)
        .run(&groups)
        .await;
    tracing::info!(
        statements = session.statements().len(),
        "dry run: nothing was written"
    );
    Ok(report)
}
