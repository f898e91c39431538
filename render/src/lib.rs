//! CI test report renderer.
//!
//! Turns classified result sets into the two report artifacts: a markdown
//! summary table (one row per configuration) and one HTML detail page per
//! configuration.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//! use cireport_render::{generate, HtmlDetailTemplate};
//! use cireport_results::ResultSet;
//!
//! let sets = ResultSet::from_triples(&["linux-x64", "x64.html", "out/junit"])
//!     .expect("complete triples");
//! let summary = generate(
//!     &sets,
//!     "https://storage.example/run-42/",
//!     Path::new("public/summary"),
//!     &HtmlDetailTemplate,
//! )
//! .expect("Report generation failed");
//! println!("failed: {}", summary.is_failed());
//! ```
//!
//! # Output Structure
//!
//! ```text
//! <out_dir>/
//!   <detail_name>     ← one HTML page per non-empty result set
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod detail;
pub mod html;
pub mod step_summary;
pub mod table;
pub mod writer;

use std::path::Path;

use anyhow::{Context, Result};
use cireport_results::{collect_line, ResultSet, Summary};
use tracing::{debug, info};

pub use detail::{DetailTemplate, DetailView, HtmlDetailTemplate, StatusGroup};
pub use step_summary::{render_step_summary, write_step_summary, SummarySink};
pub use table::{render_count, render_summary_table, FootnoteStyle, MuteRulesLink};

/// Reads every result set, writes a detail page for each non-empty one, and
/// returns the aggregated summary.
///
/// A set's report URL is `url_prefix` followed by its detail name; detail
/// pages link back to `url_prefix`.
///
/// # Errors
///
/// Returns an error if result files cannot be read or a page cannot be written.
pub fn generate(
    sets: &[ResultSet],
    url_prefix: &str,
    out_dir: &Path,
    template: &dyn DetailTemplate,
) -> Result<Summary> {
    let mut summary = Summary::new();

    for set in sets {
        let mut line = collect_line(set)
            .with_context(|| format!("Failed to read results for {}", set.title))?;

        if line.is_empty() {
            debug!(title = %set.title, "no test cases, skipping");
            continue;
        }

        let page = template.render(&DetailView::build(&line, url_prefix));
        let path = out_dir.join(&set.detail_name);
        writer::write_html(&path, &page)?;
        info!(
            title = %set.title,
            tests = line.test_count(),
            path = %path.display(),
            "detail report written"
        );

        line.set_report(&set.detail_name, format!("{url_prefix}{}", set.detail_name));
        summary.add_line(line);
    }

    Ok(summary)
}
