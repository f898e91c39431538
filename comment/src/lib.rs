//! Pull request status comments for CI test reports.
//!
//! Each (pull request, run, build preset, dry-run) combination owns exactly
//! one comment. The first invocation creates it; later invocations append a
//! section to it and never rewrite earlier content.
//!
//! # Entry Point
//!
//! ```no_run
//! use cireport_comment::{
//!     sync_comment, CommentKey, GithubClient, GithubContext, SectionContext,
//! };
//! use cireport_results::Summary;
//!
//! # fn main() -> cireport_comment::Result<()> {
//! let env = GithubContext::from_env();
//! let pr = env.pull_request()?;
//! let client = GithubClient::new(env.api_url(), env.repository(), env.token()?)?;
//! let key = CommentKey {
//!     pr_number: pr.number,
//!     run_number: env.run_number()?,
//!     build_preset: "relwithdebinfo".to_string(),
//!     dry_run: false,
//! };
//! let ctx = SectionContext {
//!     build_preset: key.build_preset.clone(),
//!     commit_sha: pr.head.sha.clone(),
//!     test_history_url: None,
//! };
//! let thread = client.pull_request(pr.number);
//! sync_comment(&thread, &key, &Summary::new(), &ctx, &env.mute_rules())?;
//! # Ok(())
//! # }
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod body;
pub mod context;
pub mod error;
pub mod github;
pub mod header;
pub mod section;
pub mod sync;
pub mod thread;

pub use body::compose_body;
pub use context::{read_pull_request_event, GithubContext, Head, PullRequest};
pub use error::{CommentError, Result};
pub use github::{GithubClient, PullRequestComments};
pub use header::CommentKey;
pub use section::{render_section, SectionContext};
pub use sync::{sync_comment, SyncOutcome};
pub use thread::{Comment, CommentThread};
