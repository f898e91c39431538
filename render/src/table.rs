//! Markdown summary table: one row per configuration, one column per status.

use cireport_results::{Summary, SummaryLine, TestStatus};

/// Default GitHub server.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Repository whose mute rules are linked when none is configured.
pub const DEFAULT_REPOSITORY: &str = "ydb-platform/nbs";

/// How the `MUTED` column header points at the mute rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootnoteStyle {
    /// A `[?]` superscript link in the header.
    Reference,
    /// A `[^1]` footnote in the header plus its definition after the table,
    /// for bodies that must carry their own footnote text.
    Inline,
}

/// Location of the mute rule definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuteRulesLink {
    url: String,
}

impl MuteRulesLink {
    /// Builds the link from a server URL and an `owner/name` repository.
    pub fn new(server_url: &str, repository: &str) -> Self {
        Self {
            url: format!(
                "{}/{}/tree/main/.github/config",
                server_url.trim_end_matches('/'),
                repository
            ),
        }
    }

    /// URL of the mute rules directory.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for MuteRulesLink {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL, DEFAULT_REPOSITORY)
    }
}

/// Status columns after `TESTS`, in table order.
const COLUMNS: [(TestStatus, &str); 6] = [
    (TestStatus::Pass, "PASSED"),
    (TestStatus::Error, "ERRORS"),
    (TestStatus::Fail, "FAILED"),
    (TestStatus::FailBuild, "FAILED BUILD"),
    (TestStatus::Skip, "SKIPPED"),
    (TestStatus::Mute, "MUTED"),
];

/// Renders the summary table as markdown lines.
///
/// The title column is only present when there is more than one line. With
/// [`FootnoteStyle::Inline`] the footnote definition follows the table after a
/// blank line.
pub fn render_summary_table(
    summary: &Summary,
    footnote: FootnoteStyle,
    mute_rules: &MuteRulesLink,
) -> Vec<String> {
    let need_title_column = summary.lines().len() > 1;

    let marker = match footnote {
        FootnoteStyle::Inline => "[^1]".to_string(),
        FootnoteStyle::Reference => format!(
            r#"<sup>[?]({} "All mute rules are defined here")</sup>"#,
            mute_rules.url()
        ),
    };

    let mut header: Vec<String> = Vec::with_capacity(COLUMNS.len() + 2);
    if need_title_column {
        header.push(String::new());
    }
    header.push("TESTS".to_string());
    for (status, name) in COLUMNS {
        if status == TestStatus::Mute {
            header.push(format!("{name}{marker}"));
        } else {
            header.push(name.to_string());
        }
    }

    let mut align: Vec<String> = Vec::with_capacity(header.len());
    if need_title_column {
        align.push(":---".to_string());
    }
    align.resize(header.len(), "---:".to_string());

    let mut result = vec![render_row(&header), render_row(&align)];
    for line in summary.lines() {
        result.push(render_row(&line_cells(line, need_title_column)));
    }

    if footnote == FootnoteStyle::Inline {
        result.push(String::new());
        result.push(format!(
            "[^1]: All mute rules are defined [here]({}).",
            mute_rules.url()
        ));
    }

    result
}

fn line_cells(line: &SummaryLine, with_title: bool) -> Vec<String> {
    let url = line.report_url();
    let mut cells = Vec::with_capacity(COLUMNS.len() + 2);
    if with_title {
        cells.push(line.title.clone());
    }
    cells.push(render_count(line.test_count(), url));
    for (status, _) in COLUMNS {
        let anchored = format!("{}#{}", url, status.anchor());
        cells.push(render_count(line.counters().get(status), &anchored));
    }
    cells
}

fn render_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Renders a count as a markdown link, or a plain `0` when there is nothing to link to.
pub fn render_count(value: usize, url: &str) -> String {
    if value == 0 {
        "0".to_string()
    } else {
        format!("[{value}]({url})")
    }
}
