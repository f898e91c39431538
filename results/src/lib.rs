//! Test result taxonomy for CI summaries.
//!
//! Reads JUnit result sets, classifies every test case into one of six
//! statuses, and aggregates per-configuration and run-wide counters.
//!
//! # Entry Point
//!
//! ```no_run
//! use cireport_results::{collect_line, ResultSet, Summary};
//!
//! let sets = ResultSet::from_triples(&["linux-x64", "x64.html", "out/junit"])
//!     .expect("complete triples");
//! let mut summary = Summary::new();
//! for set in &sets {
//!     let line = collect_line(set).expect("readable results");
//!     summary.add_line(line);
//! }
//! assert!(!summary.is_failed());
//! ```
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Result files → [`RawTestCase`] | [`junit`] |
//! | [`RawTestCase`] → [`TestResult`] | [`classify`] |
//! | [`TestResult`] → [`SummaryLine`] → [`Summary`] | [`summary`] |

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod classify;
pub mod error;
pub mod junit;
pub mod record;
pub mod status;
pub mod summary;

use std::path::PathBuf;

pub use classify::{LinkKind, TestResult};
pub use error::{Result, ResultsError};
pub use record::{Marker, RawTestCase};
pub use status::{TestStatus, DISPLAY_ORDER};
pub use summary::{ReportRef, StatusCounters, Summary, SummaryLine};

/// One named result set: a configuration, its detail artifact, and its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    /// Display title, e.g. `linux-x64`.
    pub title: String,
    /// File name of the detail report, relative to the output directory.
    pub detail_name: String,
    /// JUnit file or directory.
    pub path: PathBuf,
}

impl ResultSet {
    /// Groups positional `TITLE DETAIL_NAME PATH` values into result sets.
    ///
    /// # Errors
    ///
    /// Returns [`ResultsError::IncompleteTriples`] if the value count is not a
    /// multiple of three.
    pub fn from_triples<S: AsRef<str>>(values: &[S]) -> Result<Vec<ResultSet>> {
        if values.len() % 3 != 0 {
            return Err(ResultsError::IncompleteTriples(values.len()));
        }
        Ok(values
            .chunks_exact(3)
            .map(|chunk| ResultSet {
                title: chunk[0].as_ref().to_string(),
                detail_name: chunk[1].as_ref().to_string(),
                path: PathBuf::from(chunk[2].as_ref()),
            })
            .collect())
    }
}

/// Reads and classifies every test case of a result set.
///
/// # Errors
///
/// Returns an error if a result file cannot be listed, read, or parsed.
pub fn collect_line(set: &ResultSet) -> Result<SummaryLine> {
    let mut line = SummaryLine::new(&set.title);
    for case in junit::read_test_cases(&set.path)? {
        line.add(TestResult::from_record(&case));
    }
    Ok(line)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn triples_are_grouped_in_order() {
        let sets =
            ResultSet::from_triples(&["x64", "x64.html", "a", "arm", "arm.html", "b"]).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[1].title, "arm");
        assert_eq!(sets[1].detail_name, "arm.html");
        assert_eq!(sets[1].path, PathBuf::from("b"));
    }

    #[test]
    fn incomplete_triples_are_rejected() {
        let err = ResultSet::from_triples(&["x64", "x64.html"]).unwrap_err();
        assert!(matches!(err, ResultsError::IncompleteTriples(2)));
        assert!(ResultSet::from_triples::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn collect_line_classifies_each_case() {
        let dir = tempfile::tempdir().unwrap();
        let xml = r#"<testsuite>
  <testcase classname="a" name="ok" time="1"/>
  <testcase classname="a" name="broken" time="1"><failure>assert</failure></testcase>
</testsuite>"#;
        std::fs::write(dir.path().join("junit.xml"), xml).unwrap();

        let set = ResultSet {
            title: "linux-x64".into(),
            detail_name: "x64.html".into(),
            path: dir.path().to_path_buf(),
        };
        let line = collect_line(&set).unwrap();
        assert_eq!(line.test_count(), 2);
        assert_eq!(line.counters().fail, 1);
        assert!(line.is_failed());
    }
}
