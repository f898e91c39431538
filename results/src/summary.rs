//! Aggregation: per-configuration [`SummaryLine`]s and the run-wide [`Summary`].

use crate::classify::TestResult;
use crate::status::TestStatus;

/// Count of results per status. Every status always has a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounters {
    /// `PASS` results.
    pub pass: usize,
    /// `FAIL` results.
    pub fail: usize,
    /// `ERROR` results.
    pub error: usize,
    /// `SKIP` results.
    pub skip: usize,
    /// `MUTE` results.
    pub mute: usize,
    /// `FAIL_BUILD` results.
    pub fail_build: usize,
}

impl StatusCounters {
    /// Returns the count for `status`.
    pub fn get(&self, status: TestStatus) -> usize {
        match status {
            TestStatus::Pass => self.pass,
            TestStatus::Fail => self.fail,
            TestStatus::Error => self.error,
            TestStatus::Skip => self.skip,
            TestStatus::Mute => self.mute,
            TestStatus::FailBuild => self.fail_build,
        }
    }

    fn slot(&mut self, status: TestStatus) -> &mut usize {
        match status {
            TestStatus::Pass => &mut self.pass,
            TestStatus::Fail => &mut self.fail,
            TestStatus::Error => &mut self.error,
            TestStatus::Skip => &mut self.skip,
            TestStatus::Mute => &mut self.mute,
            TestStatus::FailBuild => &mut self.fail_build,
        }
    }

    /// Adds one to the count for `status`.
    pub fn increment(&mut self, status: TestStatus) {
        *self.slot(status) += 1;
    }

    /// Sum over all statuses.
    pub fn total(&self) -> usize {
        TestStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// The rendered detail artifact of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRef {
    /// File name of the artifact inside the output directory.
    pub label: String,
    /// Public URL of the artifact.
    pub url: String,
}

/// Results of one configuration (one result set).
#[derive(Debug, Clone)]
pub struct SummaryLine {
    /// Display title, e.g. `linux-x64`.
    pub title: String,
    tests: Vec<TestResult>,
    counters: StatusCounters,
    is_failed: bool,
    report: Option<ReportRef>,
}

impl SummaryLine {
    /// Creates an empty line.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tests: Vec::new(),
            counters: StatusCounters::default(),
            is_failed: false,
            report: None,
        }
    }

    /// Appends a result and updates the counters and the failed flag.
    pub fn add(&mut self, test: TestResult) {
        self.is_failed |= test.status.is_failure();
        self.counters.increment(test.status);
        self.tests.push(test);
    }

    /// Records the detail artifact rendered for this line.
    pub fn set_report(&mut self, label: impl Into<String>, url: impl Into<String>) {
        self.report = Some(ReportRef {
            label: label.into(),
            url: url.into(),
        });
    }

    /// Results in arrival order.
    pub fn tests(&self) -> &[TestResult] {
        &self.tests
    }

    /// Per-status counters.
    pub fn counters(&self) -> &StatusCounters {
        &self.counters
    }

    /// Number of results.
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    /// Returns true if the line holds no results.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Returns true if any result is `ERROR`, `FAIL` or `FAIL_BUILD`.
    pub fn is_failed(&self) -> bool {
        self.is_failed
    }

    /// Detail artifact, once rendered.
    pub fn report(&self) -> Option<&ReportRef> {
        self.report.as_ref()
    }

    /// URL of the detail artifact, or an empty string before rendering.
    pub fn report_url(&self) -> &str {
        self.report.as_ref().map(|r| r.url.as_str()).unwrap_or("")
    }
}

/// All configurations of one invocation.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    lines: Vec<SummaryLine>,
    is_failed: bool,
}

impl Summary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line. Lines without results are dropped.
    ///
    /// Returns true if the line was kept.
    pub fn add_line(&mut self, line: SummaryLine) -> bool {
        if line.is_empty() {
            return false;
        }
        self.is_failed |= line.is_failed();
        self.lines.push(line);
        true
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[SummaryLine] {
        &self.lines
    }

    /// Returns true if any line is failed.
    pub fn is_failed(&self) -> bool {
        self.is_failed
    }

    /// Returns true if no configuration produced results.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawTestCase;

    fn result(name: &str, status: TestStatus) -> TestResult {
        let mut test = TestResult::from_record(&RawTestCase::new("suite", name).with_time("0.1"));
        test.status = status;
        test
    }

    #[test]
    fn counters_track_every_addition() {
        let mut line = SummaryLine::new("linux-x64");
        for (i, status) in TestStatus::ALL.into_iter().enumerate() {
            for n in 0..=i {
                line.add(result(&format!("{status:?}{n}"), status));
            }
        }
        for (i, status) in TestStatus::ALL.into_iter().enumerate() {
            assert_eq!(line.counters().get(status), i + 1);
            assert_eq!(
                line.tests().iter().filter(|t| t.status == status).count(),
                line.counters().get(status)
            );
        }
        assert_eq!(line.counters().total(), line.test_count());
    }

    #[test]
    fn failed_flag_is_sticky() {
        let mut line = SummaryLine::new("linux-x64");
        line.add(result("a", TestStatus::Pass));
        assert!(!line.is_failed());
        line.add(result("b", TestStatus::FailBuild));
        assert!(line.is_failed());
        line.add(result("c", TestStatus::Pass));
        line.add(result("d", TestStatus::Skip));
        line.add(result("e", TestStatus::Mute));
        assert!(line.is_failed());
    }

    #[test]
    fn skip_and_mute_do_not_fail_a_line() {
        let mut line = SummaryLine::new("linux-x64");
        line.add(result("a", TestStatus::Skip));
        line.add(result("b", TestStatus::Mute));
        assert!(!line.is_failed());
    }

    #[test]
    fn empty_lines_are_dropped() {
        let mut summary = Summary::new();
        assert!(!summary.add_line(SummaryLine::new("linux-arm")));
        assert!(summary.is_empty());
        assert!(!summary.is_failed());

        let mut line = SummaryLine::new("linux-x64");
        line.add(result("a", TestStatus::Error));
        assert!(summary.add_line(line));
        assert_eq!(summary.lines().len(), 1);
        assert!(summary.is_failed());
    }

    #[test]
    fn summary_failed_flag_is_sticky() {
        let mut summary = Summary::new();
        let mut failed = SummaryLine::new("a");
        failed.add(result("x", TestStatus::Fail));
        let mut passed = SummaryLine::new("b");
        passed.add(result("y", TestStatus::Pass));
        summary.add_line(failed);
        summary.add_line(passed);
        assert!(summary.is_failed());
    }

    #[test]
    fn report_is_recorded_once_rendered() {
        let mut line = SummaryLine::new("linux-x64");
        assert_eq!(line.report_url(), "");
        line.set_report("x64.html", "https://storage/run/x64.html");
        assert_eq!(line.report_url(), "https://storage/run/x64.html");
        assert_eq!(line.report().map(|r| r.label.as_str()), Some("x64.html"));
    }
}
