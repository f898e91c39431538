//! Detail report: the results of one configuration grouped by status.
//!
//! [`DetailView`] holds everything a template needs. Groups follow
//! [`DISPLAY_ORDER`] (most actionable first), only statuses that occur are
//! present, and tests within a group are sorted by full name. Markup is left
//! to a [`DetailTemplate`]; [`HtmlDetailTemplate`] is the stock one.

use cireport_results::{SummaryLine, TestResult, TestStatus, DISPLAY_ORDER};

use crate::html::{escape_html, render_page};

/// Tests of one status.
#[derive(Debug, Clone)]
pub struct StatusGroup<'a> {
    /// Status shared by every test in the group.
    pub status: TestStatus,
    /// Tests sorted by full name.
    pub tests: Vec<&'a TestResult>,
    /// True if any test in the group has a diagnostic link.
    pub has_any_link: bool,
}

/// Input of a detail template.
#[derive(Debug, Clone)]
pub struct DetailView<'a> {
    /// Configuration title.
    pub title: &'a str,
    /// Non-empty status groups in display order.
    pub groups: Vec<StatusGroup<'a>>,
    /// URL of the summary the page links back to.
    pub summary_url: &'a str,
}

impl<'a> DetailView<'a> {
    /// Groups the tests of `line`.
    pub fn build(line: &'a SummaryLine, summary_url: &'a str) -> Self {
        let groups = DISPLAY_ORDER
            .iter()
            .filter_map(|&status| {
                let mut tests: Vec<&TestResult> =
                    line.tests().iter().filter(|t| t.status == status).collect();
                if tests.is_empty() {
                    return None;
                }
                tests.sort_by_cached_key(|t| t.full_name());
                let has_any_link = tests.iter().any(|t| t.has_links());
                Some(StatusGroup {
                    status,
                    tests,
                    has_any_link,
                })
            })
            .collect();

        Self {
            title: &line.title,
            groups,
            summary_url,
        }
    }

    /// Statuses present, in display order.
    pub fn status_order(&self) -> Vec<TestStatus> {
        self.groups.iter().map(|g| g.status).collect()
    }

    /// Returns true if the group for `status` exists and has a diagnostic link.
    pub fn has_any_link(&self, status: TestStatus) -> bool {
        self.groups
            .iter()
            .any(|g| g.status == status && g.has_any_link)
    }
}

/// Turns a [`DetailView`] into a document.
pub trait DetailTemplate {
    /// Renders the view.
    fn render(&self, view: &DetailView<'_>) -> String;
}

/// Standalone HTML page with one anchored table per status.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDetailTemplate;

impl DetailTemplate for HtmlDetailTemplate {
    fn render(&self, view: &DetailView<'_>) -> String {
        let mut body = String::new();
        body.push_str(&format!("<h1>{}</h1>\n", escape_html(view.title)));
        body.push_str(&format!(
            "<p><a href=\"{}\">Back to summary</a></p>\n",
            escape_html(view.summary_url)
        ));

        body.push_str("<nav class=\"status-index\" aria-label=\"Statuses\">\n");
        for group in &view.groups {
            body.push_str(&format!(
                "<a href=\"#{anchor}\" class=\"status-{anchor}\">{label} ({count})</a>\n",
                anchor = group.status.anchor(),
                label = group.status.label(),
                count = group.tests.len(),
            ));
        }
        body.push_str("</nav>\n");

        for group in &view.groups {
            render_group(&mut body, group);
        }

        render_page(&format!("{} test results", view.title), &body)
    }
}

fn render_group(body: &mut String, group: &StatusGroup<'_>) {
    let anchor = group.status.anchor();
    body.push_str(&format!(
        "<h2 id=\"{anchor}\" class=\"status-{anchor}\">{} <small>({})</small></h2>\n",
        group.status.label(),
        group.tests.len()
    ));
    body.push_str("<table>\n<thead><tr><th>Test</th><th>Elapsed</th><th>Status</th>");
    if group.has_any_link {
        body.push_str("<th>Logs</th>");
    }
    body.push_str("</tr></thead>\n<tbody>\n");

    for test in &group.tests {
        body.push_str(&format!(
            "<tr><td>{}</td><td class=\"elapsed\">{}</td><td class=\"status-{anchor}\">{}",
            escape_html(&test.full_name()),
            test.elapsed_display(),
            test.status.label(),
        ));
        if test.is_timed_out {
            body.push_str(" <span class=\"timeout\">TIMEOUT</span>");
        }
        body.push_str("</td>");
        if group.has_any_link {
            let links: Vec<String> = test
                .links
                .iter()
                .map(|(kind, url)| {
                    format!("<a href=\"{}\">{}</a>", escape_html(url), kind.label())
                })
                .collect();
            body.push_str(&format!("<td>{}</td>", links.join(" ")));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");
}
