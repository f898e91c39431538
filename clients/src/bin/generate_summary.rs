//! `generate-summary`: Builds the test report of a CI run and publishes it.
//!
//! **Outputs:**
//! - `<summary-out-path>/<DETAIL_NAME>`: HTML detail page per non-empty result set
//! - step summary (`--summary-out-env-path`, `$GITHUB_STEP_SUMMARY`, or stdout)
//! - pull request status comment, when triggered by a pull request
//!
//! **Usage:**
//! ```text
//! generate-summary --summary-out-path <dir> --summary-url-prefix <url> \
//!     [--summary-out-env-path <file>] [--test-history-url <url>] \
//!     [--build-preset <name>] [--is-dry-run] TITLE DETAIL_NAME PATH...
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cireport_comment::{sync_comment, CommentKey, GithubClient, GithubContext, SectionContext};
use cireport_render::{generate, write_step_summary, HtmlDetailTemplate, SummarySink};
use cireport_results::{ResultSet, Summary};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate the CI test summary and pull request comment.
#[derive(Parser)]
#[command(
    name = "generate-summary",
    about = "Generate the CI test summary and pull request comment"
)]
struct Args {
    /// Directory the HTML detail pages are written to.
    #[arg(long)]
    summary_out_path: PathBuf,

    /// File to write the summary to instead of GITHUB_STEP_SUMMARY.
    /// An empty value means no override.
    #[arg(long, default_value = "")]
    summary_out_env_path: String,

    /// URL prefix the detail pages are published under.
    #[arg(long)]
    summary_url_prefix: String,

    /// Link to the test history dashboard.
    #[arg(long)]
    test_history_url: Option<String>,

    /// Build preset label used in the comment.
    #[arg(long, default_value = "default-linux-x86-64-relwithdebinfo")]
    build_preset: String,

    /// Mark the comment as a simulation, not a real result.
    #[arg(long)]
    is_dry_run: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Result sets as `TITLE DETAIL_NAME PATH` triples.
    #[arg(required = true, num_args = 1.., value_name = "TITLE DETAIL_NAME PATH")]
    args: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();

    let sets = ResultSet::from_triples(&args.args).context("Invalid argument count")?;
    let env = GithubContext::from_env();
    let mute_rules = env.mute_rules();

    let summary = generate(
        &sets,
        &args.summary_url_prefix,
        &args.summary_out_path,
        &HtmlDetailTemplate,
    )?;

    let sink = summary_sink(&args, &env);
    write_step_summary(&summary, &sink, &mute_rules)?;

    if env.is_pull_request() {
        update_pr_comment(&args, &env, &summary)?;
    } else {
        info!("not a pull request run, skipping comment");
    }

    Ok(())
}

fn summary_sink(args: &Args, env: &GithubContext) -> SummarySink {
    let explicit = Some(args.summary_out_env_path.as_str())
        .filter(|p| !p.is_empty())
        .map(Path::new);
    SummarySink::resolve(explicit, env.step_summary.as_deref())
}

fn update_pr_comment(args: &Args, env: &GithubContext, summary: &Summary) -> Result<()> {
    let pr = env.pull_request()?;
    let client = GithubClient::new(env.api_url(), env.repository(), env.token()?)?;

    let key = CommentKey {
        pr_number: pr.number,
        run_number: env.run_number()?,
        build_preset: args.build_preset.clone(),
        dry_run: args.is_dry_run,
    };
    let ctx = SectionContext {
        build_preset: args.build_preset.clone(),
        commit_sha: pr.head.sha,
        test_history_url: args.test_history_url.clone(),
    };

    let outcome = sync_comment(
        &client.pull_request(pr.number),
        &key,
        summary,
        &ctx,
        &env.mute_rules(),
    )
    .with_context(|| format!("Failed to update comment on pull request #{}", pr.number))?;

    info!(pr = pr.number, comment = outcome.comment_id(), "status comment synced");
    Ok(())
}
