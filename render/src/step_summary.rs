//! The run-wide summary written for the CI job page.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cireport_results::Summary;
use tracing::info;

use crate::table::{render_summary_table, FootnoteStyle, MuteRulesLink};
use crate::writer::append_text;

/// Text written instead of a table when no configuration produced results.
pub const NO_RESULTS_MESSAGE: &str =
    ":red_circle: Test run completed, no test results found. Please check build logs.";

/// Where the summary goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySink {
    /// Appended to a file.
    File(PathBuf),
    /// Printed to stdout.
    Stdout,
}

impl SummarySink {
    /// Picks the explicit path, then the job's step-summary file, then stdout.
    pub fn resolve(explicit: Option<&Path>, step_summary: Option<&Path>) -> Self {
        match explicit.or(step_summary) {
            Some(path) => SummarySink::File(path.to_path_buf()),
            None => SummarySink::Stdout,
        }
    }
}

/// Renders the summary text, always newline-terminated.
pub fn render_step_summary(summary: &Summary, mute_rules: &MuteRulesLink) -> String {
    let mut out = String::new();
    if summary.is_empty() {
        out.push_str(NO_RESULTS_MESSAGE);
    } else {
        for line in render_summary_table(summary, FootnoteStyle::Inline, mute_rules) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

/// Writes the summary to `sink`.
///
/// # Errors
///
/// Returns an error if the sink cannot be written.
pub fn write_step_summary(
    summary: &Summary,
    sink: &SummarySink,
    mute_rules: &MuteRulesLink,
) -> Result<()> {
    let text = render_step_summary(summary, mute_rules);
    match sink {
        SummarySink::File(path) => {
            append_text(path, &text)?;
            info!(path = %path.display(), "summary written");
        }
        SummarySink::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write summary to stdout")?;
        }
    }
    Ok(())
}
