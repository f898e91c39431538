//! Test status taxonomy: the six statuses, their severity rank, and the
//! order in which detail reports present them.

use std::cmp::Ordering;

/// Final classification of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStatus {
    /// The test ran and passed.
    Pass,
    /// The test ran and failed.
    Fail,
    /// The test harness reported an error.
    Error,
    /// The test was skipped.
    Skip,
    /// The test is muted by a mute rule.
    Mute,
    /// The test did not run because its build failed.
    FailBuild,
}

/// Severity rank per status, indexed by [`TestStatus::index`].
///
/// `PASS < FAIL < ERROR < SKIP < MUTE < FAIL_BUILD`. Only used for comparisons;
/// reports use [`DISPLAY_ORDER`].
const SEVERITY: [u8; 6] = [0, 1, 2, 3, 4, 5];

/// Order of status groups in the detail report: most actionable first.
pub const DISPLAY_ORDER: [TestStatus; 6] = [
    TestStatus::Error,
    TestStatus::Fail,
    TestStatus::FailBuild,
    TestStatus::Skip,
    TestStatus::Mute,
    TestStatus::Pass,
];

impl TestStatus {
    /// All statuses in declaration order.
    pub const ALL: [TestStatus; 6] = [
        TestStatus::Pass,
        TestStatus::Fail,
        TestStatus::Error,
        TestStatus::Skip,
        TestStatus::Mute,
        TestStatus::FailBuild,
    ];

    /// Position of this status in [`TestStatus::ALL`].
    pub const fn index(self) -> usize {
        match self {
            TestStatus::Pass => 0,
            TestStatus::Fail => 1,
            TestStatus::Error => 2,
            TestStatus::Skip => 3,
            TestStatus::Mute => 4,
            TestStatus::FailBuild => 5,
        }
    }

    /// Severity rank used for internal comparisons.
    pub const fn severity(self) -> u8 {
        SEVERITY[self.index()]
    }

    /// Identifier used as an HTML anchor and URL fragment (`FAIL_BUILD`).
    pub const fn anchor(self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Error => "ERROR",
            TestStatus::Skip => "SKIP",
            TestStatus::Mute => "MUTE",
            TestStatus::FailBuild => "FAIL_BUILD",
        }
    }

    /// Human-readable label (`FAIL BUILD`).
    pub const fn label(self) -> &'static str {
        match self {
            TestStatus::FailBuild => "FAIL BUILD",
            other => other.anchor(),
        }
    }

    /// Returns true for statuses that make a configuration count as failed.
    pub const fn is_failure(self) -> bool {
        matches!(
            self,
            TestStatus::Error | TestStatus::Fail | TestStatus::FailBuild
        )
    }
}

impl PartialOrd for TestStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TestStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity().cmp(&other.severity())
    }
}
