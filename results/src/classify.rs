//! Status classification: turns one [`RawTestCase`] into a [`TestResult`].
//!
//! Classification is total. Every record yields a status (falling back to
//! `PASS`) and an unparsable `time` attribute degrades to zero seconds.

use tracing::{debug, warn};

use crate::record::RawTestCase;
use crate::status::TestStatus;

/// Failure text marking a test that never ran because its build failed.
pub const FAILED_BUILD_MARKER: &str = "skipped due to a failed build";

/// Failure text marking a test killed by the runner's timeout.
pub const TIMEOUT_MARKER: &str = "Killed by timeout";

/// Property whose presence mutes a test.
pub const MUTE_PROPERTY: &str = "mute";

/// Suffix appended to the logs directory URL.
const DIRECTORY_INDEX: &str = "/index.html";

/// Kind of a diagnostic link attached to a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Directory with all logs of the test.
    Directory,
    /// Test log.
    Log,
    /// Captured stdout.
    Stdout,
    /// Captured stderr.
    Stderr,
    /// Backtrace of a crash.
    Backtrace,
    /// Stdout of the recipe that set up the test environment.
    RecipeStdout,
    /// Stderr of the recipe that set up the test environment.
    RecipeStderr,
}

impl LinkKind {
    /// All kinds in the order links are stored and displayed.
    pub const ALL: [LinkKind; 7] = [
        LinkKind::Directory,
        LinkKind::Log,
        LinkKind::Stdout,
        LinkKind::Stderr,
        LinkKind::Backtrace,
        LinkKind::RecipeStdout,
        LinkKind::RecipeStderr,
    ];

    /// Properties consulted for this kind, first non-empty wins.
    fn properties(self) -> &'static [&'static str] {
        match self {
            LinkKind::Directory => &["url:logs_directory"],
            LinkKind::Log => &["url:log", "url:Log"],
            LinkKind::Stdout => &["url:stdout"],
            LinkKind::Stderr => &["url:stderr"],
            LinkKind::Backtrace => &["url:backtrace"],
            LinkKind::RecipeStdout => &["url:recipe stdout"],
            LinkKind::RecipeStderr => &["url:recipe stderr"],
        }
    }

    /// Short label shown in reports.
    pub const fn label(self) -> &'static str {
        match self {
            LinkKind::Directory => "DIR",
            LinkKind::Log => "log",
            LinkKind::Stdout => "stdout",
            LinkKind::Stderr => "stderr",
            LinkKind::Backtrace => "backtrace",
            LinkKind::RecipeStdout => "recipe_stdout",
            LinkKind::RecipeStderr => "recipe_stderr",
        }
    }
}

/// A classified test case.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Group path (JUnit `classname`).
    pub classname: String,
    /// Test name.
    pub name: String,
    /// Final status.
    pub status: TestStatus,
    /// Non-empty diagnostic links, in [`LinkKind::ALL`] order.
    pub links: Vec<(LinkKind, String)>,
    /// Elapsed seconds; zero when the record had no usable value.
    pub elapsed: f64,
    /// True if the failure text reports a timeout kill.
    pub is_timed_out: bool,
}

impl TestResult {
    /// Classifies a raw record.
    pub fn from_record(record: &RawTestCase) -> Self {
        let status = classify(record);

        let is_timed_out = record
            .failure
            .as_ref()
            .is_some_and(|f| f.text_contains(TIMEOUT_MARKER));
        if is_timed_out {
            debug!(
                classname = %record.classname,
                name = %record.name,
                "test was killed by timeout"
            );
        }

        Self {
            classname: record.classname.clone(),
            name: record.name.clone(),
            status,
            links: collect_links(record),
            elapsed: parse_elapsed(record),
            is_timed_out,
        }
    }

    /// `classname/name`, the display and sort key.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.classname, self.name)
    }

    /// Returns true if at least one diagnostic link is attached.
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    /// Returns the URL of a link kind, if present.
    pub fn link(&self, kind: LinkKind) -> Option<&str> {
        self.links
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, url)| url.as_str())
    }

    /// Elapsed time as `1m 2.500s` or `2.500s`.
    pub fn elapsed_display(&self) -> String {
        let minutes = (self.elapsed / 60.0).floor();
        let seconds = self.elapsed - minutes * 60.0;
        if minutes > 0.0 {
            format!("{}m {:.3}s", minutes as u64, seconds)
        } else {
            format!("{:.3}s", seconds)
        }
    }
}

/// Applies the decision order; the first matching rule wins.
fn classify(record: &RawTestCase) -> TestStatus {
    if let Some(failure) = &record.failure {
        if failure.text_contains(FAILED_BUILD_MARKER) {
            return TestStatus::FailBuild;
        }
        return TestStatus::Fail;
    }
    if record.error.is_some() {
        return TestStatus::Error;
    }
    if record.property(MUTE_PROPERTY).is_some() {
        return TestStatus::Mute;
    }
    if record.skipped.is_some() {
        return TestStatus::Skip;
    }
    TestStatus::Pass
}

fn collect_links(record: &RawTestCase) -> Vec<(LinkKind, String)> {
    LinkKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let value = kind
                .properties()
                .iter()
                .filter_map(|p| record.property(p))
                .find(|v| !v.is_empty())?;
            let url = match kind {
                LinkKind::Directory => format!("{value}{DIRECTORY_INDEX}"),
                _ => value.to_string(),
            };
            Some((kind, url))
        })
        .collect()
}

/// Parses the `time` attribute. Zero is also what a genuine zero measurement
/// yields; the two cases are not distinguished.
fn parse_elapsed(record: &RawTestCase) -> f64 {
    let parsed = record
        .time
        .as_deref()
        .and_then(|t| t.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0);

    match parsed {
        Some(value) => value,
        None => {
            warn!(
                classname = %record.classname,
                name = %record.name,
                value = ?record.time,
                "unable to parse elapsed time, using 0"
            );
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case() -> RawTestCase {
        RawTestCase::new("cloud/blockstore/tests", "test_read").with_time("1.5")
    }

    #[test]
    fn no_markers_is_pass() {
        let result = TestResult::from_record(&case());
        assert_eq!(result.status, TestStatus::Pass);
        assert!(!result.is_timed_out);
        assert!(result.links.is_empty());
    }

    #[test]
    fn failed_build_text_wins_over_plain_failure() {
        let record = case().with_failure("test skipped due to a failed build of target");
        assert_eq!(TestResult::from_record(&record).status, TestStatus::FailBuild);

        let record = case().with_failure("assertion failed");
        assert_eq!(TestResult::from_record(&record).status, TestStatus::Fail);
    }

    #[test]
    fn failure_wins_over_error_mute_and_skip() {
        let record = case()
            .with_failure("boom")
            .with_error()
            .with_skipped()
            .with_property("mute", "");
        assert_eq!(TestResult::from_record(&record).status, TestStatus::Fail);
    }

    #[test]
    fn error_wins_over_mute_and_mute_over_skip() {
        let record = case().with_error().with_property("mute", "1").with_skipped();
        assert_eq!(TestResult::from_record(&record).status, TestStatus::Error);

        let record = case().with_property("mute", "").with_skipped();
        assert_eq!(TestResult::from_record(&record).status, TestStatus::Mute);

        let record = case().with_skipped();
        assert_eq!(TestResult::from_record(&record).status, TestStatus::Skip);
    }

    #[test]
    fn timeout_flag_is_independent_of_status() {
        let record = case().with_failure("Killed by timeout (600 s)");
        let result = TestResult::from_record(&record);
        assert!(result.is_timed_out);
        assert_eq!(result.status, TestStatus::Fail);

        let record =
            case().with_failure("Killed by timeout; skipped due to a failed build");
        let result = TestResult::from_record(&record);
        assert!(result.is_timed_out);
        assert_eq!(result.status, TestStatus::FailBuild);
    }

    #[test]
    fn timeout_text_outside_failure_is_ignored() {
        let mut record = case().with_error();
        record.error = Some(crate::record::Marker::with_text("Killed by timeout"));
        assert!(!TestResult::from_record(&record).is_timed_out);
    }

    #[test]
    fn unparsable_time_becomes_zero() {
        for time in [None, Some("abc"), Some(""), Some("-3"), Some("NaN")] {
            let mut record = case();
            record.time = time.map(str::to_string);
            assert_eq!(TestResult::from_record(&record).elapsed, 0.0, "time={time:?}");
        }
        assert_eq!(TestResult::from_record(&case()).elapsed, 1.5);
    }

    #[test]
    fn links_keep_declaration_order_and_drop_empty_values() {
        let record = case()
            .with_property("url:stderr", "https://logs/stderr")
            .with_property("url:stdout", "")
            .with_property("url:logs_directory", "https://logs/dir")
            .with_property("url:recipe stdout", "https://logs/recipe.out");
        let result = TestResult::from_record(&record);
        assert_eq!(
            result.links,
            vec![
                (LinkKind::Directory, "https://logs/dir/index.html".to_string()),
                (LinkKind::Stderr, "https://logs/stderr".to_string()),
                (LinkKind::RecipeStdout, "https://logs/recipe.out".to_string()),
            ]
        );
        assert_eq!(result.link(LinkKind::Stdout), None);
    }

    #[test]
    fn capitalized_log_property_is_a_fallback() {
        let record = case().with_property("url:Log", "https://logs/Log");
        let result = TestResult::from_record(&record);
        assert_eq!(result.link(LinkKind::Log), Some("https://logs/Log"));

        let record = case()
            .with_property("url:Log", "https://logs/Log")
            .with_property("url:log", "https://logs/log");
        let result = TestResult::from_record(&record);
        assert_eq!(result.link(LinkKind::Log), Some("https://logs/log"));
    }

    #[test]
    fn elapsed_display_splits_minutes() {
        let mut result = TestResult::from_record(&case());
        assert_eq!(result.elapsed_display(), "1.500s");
        result.elapsed = 125.25;
        assert_eq!(result.elapsed_display(), "2m 5.250s");
    }

    #[test]
    fn full_name_joins_with_slash() {
        let result = TestResult::from_record(&case());
        assert_eq!(result.full_name(), "cloud/blockstore/tests/test_read");
    }
}
