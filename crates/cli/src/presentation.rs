// crates/cli/src/presentation.rs
use std::fmt::Write;

use tempsweep_engine::stats::RunResult;

use crate::error::Result;
use crate::options::OutputFormat;

/// Renders the end-of-run summary for stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_summary(result: &RunResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(result)?;
            out.push('\n');
            Ok(out)
        }
    }
}

fn render_text(result: &RunResult) -> String {
    let summary = &result.summary;
    let mut out = String::new();
    let _ = writeln!(out, "tempsweep v{} · root={}", crate::VERSION, result.root.display());
    let _ = writeln!(out, "boot: {}", result.boot);
    let _ = writeln!(
        out,
        "deleted: {} files, {} folders · kept: {} · errors: {}",
        summary.deleted_files, summary.deleted_dirs, summary.retained, summary.errors
    );
    out
}
