//! Core pipeline: load snapshot → build graph → render report.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use slntree_collect::{Diagnostics, load_snapshot};
use slntree_render::{RenderOutcome, ReportHeader, render_report};

use crate::SlntreeOptions;

/// Load the snapshot named by `opts.input` and render it.
pub fn build_report(opts: &SlntreeOptions) -> Result<RenderOutcome> {
    let load_start = Instant::now();
    let snapshot = load_snapshot(&opts.input)
        .with_context(|| format!("Failed to load snapshot: {}", opts.input.display()))?;
    info!(
        "Snapshot loading: {:.2}s",
        load_start.elapsed().as_secs_f64()
    );
    log_diagnostics(&snapshot.diagnostics);

    let render_start = Instant::now();
    let header = ReportHeader::now().with_revision(opts.revision.clone());
    let outcome = render_report(&snapshot.graph, &opts.render, &header);
    info!(
        "Report rendering: {:.2}s",
        render_start.elapsed().as_secs_f64()
    );

    Ok(outcome)
}

fn log_diagnostics(diagnostics: &Diagnostics) {
    info!(
        "  Rows read: {} ({} nodes, {} references)",
        diagnostics.rows_read, diagnostics.nodes, diagnostics.edges
    );
    if diagnostics.duplicate_nodes > 0 || diagnostics.duplicate_edges > 0 {
        info!(
            "  Duplicates ignored: {} nodes, {} references",
            diagnostics.duplicate_nodes, diagnostics.duplicate_edges
        );
    }
    if !diagnostics.skipped.is_empty() {
        warn!("  Skipped {} invalid rows", diagnostics.skipped.len());
    }
}
