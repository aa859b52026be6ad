//! Report output.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use slntree_render::Report;

/// Write the report to `path`, or to stdout when no path is given.
pub fn write_report(report: &Report, path: Option<&Path>) -> Result<()> {
    let mut text = report.to_text();
    text.push('\n');

    match path {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write report to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
