//! One report section: status line, optional history link, summary table.

use cireport_render::{render_summary_table, FootnoteStyle, MuteRulesLink};
use cireport_results::Summary;

/// Run details shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContext {
    /// Build preset label.
    pub build_preset: String,
    /// Head commit of the pull request.
    pub commit_sha: String,
    /// Optional link to the test history dashboard.
    pub test_history_url: Option<String>,
}

/// Renders a section as markdown lines.
///
/// An empty summary yields a single "no test results" line and no table.
pub fn render_section(
    summary: &Summary,
    ctx: &SectionContext,
    footnote: FootnoteStyle,
    mute_rules: &MuteRulesLink,
) -> Vec<String> {
    if summary.is_empty() {
        return vec![format!(
            ":red_circle: **{}**: Test run completed, no test results found for commit {}. \
             Please check build logs.",
            ctx.build_preset, ctx.commit_sha
        )];
    }

    let status = if summary.is_failed() {
        format!(":red_circle: **{}**: some tests FAILED", ctx.build_preset)
    } else {
        format!(":green_circle: **{}**: all tests PASSED", ctx.build_preset)
    };

    let mut lines = vec![format!("{status} for commit {}.", ctx.commit_sha)];

    if let Some(url) = ctx.test_history_url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(String::new());
        lines.push(format!("[Test history]({url})"));
    }

    lines.extend(render_summary_table(summary, footnote, mute_rules));
    lines
}
