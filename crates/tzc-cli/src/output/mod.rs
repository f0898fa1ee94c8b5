use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response in the requested format.
///
/// Text mode has nothing to add to the log, so it renders to `None`.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
    }
}

/// Print a serializable response on stdout in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    if let Some(rendered) = render(value, format)? {
        println!("{rendered}");
    }
    Ok(())
}
