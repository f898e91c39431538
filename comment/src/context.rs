//! GitHub Actions job context: repository identity, trigger, run and event payload.
//!
//! This is the only module that reads the process environment.

use std::path::{Path, PathBuf};

use cireport_render::table::{DEFAULT_REPOSITORY, DEFAULT_SERVER_URL};
use cireport_render::MuteRulesLink;
use serde::Deserialize;

use crate::error::{CommentError, Result};
use crate::github::DEFAULT_API_URL;

/// Trigger types that have a pull request to comment on.
const PULL_REQUEST_EVENTS: [&str; 2] = ["pull_request", "pull_request_target"];

/// Values read from the job environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubContext {
    /// `GITHUB_SERVER_URL`.
    pub server_url: Option<String>,
    /// `GITHUB_REPOSITORY`.
    pub repository: Option<String>,
    /// `GITHUB_API_URL`.
    pub api_url: Option<String>,
    /// `GITHUB_EVENT_NAME`.
    pub event_name: Option<String>,
    /// `GITHUB_EVENT_PATH`.
    pub event_path: Option<PathBuf>,
    /// `GITHUB_RUN_NUMBER`, unparsed.
    pub run_number: Option<String>,
    /// `GITHUB_TOKEN`.
    pub token: Option<String>,
    /// `GITHUB_STEP_SUMMARY`.
    pub step_summary: Option<PathBuf>,
}

impl GithubContext {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads variables through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            server_url: get("GITHUB_SERVER_URL"),
            repository: get("GITHUB_REPOSITORY"),
            api_url: get("GITHUB_API_URL"),
            event_name: get("GITHUB_EVENT_NAME"),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            run_number: get("GITHUB_RUN_NUMBER"),
            token: get("GITHUB_TOKEN"),
            step_summary: get("GITHUB_STEP_SUMMARY").map(PathBuf::from),
        }
    }

    /// Returns true if the job was triggered by a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.event_name
            .as_deref()
            .is_some_and(|e| PULL_REQUEST_EVENTS.contains(&e))
    }

    /// Repository, falling back to the default one.
    pub fn repository(&self) -> &str {
        self.repository.as_deref().unwrap_or(DEFAULT_REPOSITORY)
    }

    /// REST endpoint, falling back to the public API.
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Link to the mute rules of the repository.
    pub fn mute_rules(&self) -> MuteRulesLink {
        MuteRulesLink::new(
            self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL),
            self.repository(),
        )
    }

    /// Parsed `GITHUB_RUN_NUMBER`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is missing or not a number.
    pub fn run_number(&self) -> Result<u64> {
        let raw = self
            .run_number
            .as_deref()
            .ok_or(CommentError::MissingEnv("GITHUB_RUN_NUMBER"))?;
        raw.trim().parse().map_err(|_| CommentError::InvalidEnv {
            name: "GITHUB_RUN_NUMBER",
            value: raw.to_string(),
        })
    }

    /// `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is missing.
    pub fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or(CommentError::MissingEnv("GITHUB_TOKEN"))
    }

    /// Loads the pull request from the event payload file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is unset, unreadable, or not a pull request event.
    pub fn pull_request(&self) -> Result<PullRequest> {
        let path = self
            .event_path
            .as_deref()
            .ok_or(CommentError::MissingEnv("GITHUB_EVENT_PATH"))?;
        read_pull_request_event(path)
    }
}

/// The part of a pull request event payload the report needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Head branch state.
    pub head: Head,
}

/// Head of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Head {
    /// Commit the run tested.
    pub sha: String,
}

#[derive(Deserialize)]
struct PullRequestEvent {
    pull_request: PullRequest,
}

/// Parses a `pull_request` / `pull_request_target` event payload.
///
/// # Errors
///
/// Returns an error if the file cannot be read or has no `pull_request` object.
pub fn read_pull_request_event(path: &Path) -> Result<PullRequest> {
    let content = std::fs::read_to_string(path).map_err(|source| CommentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let event: PullRequestEvent = serde_json::from_str(&content)?;
    Ok(event.pull_request)
}
