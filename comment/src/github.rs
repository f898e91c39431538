//! GitHub REST adapter for pull request (issue) comments.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Serialize;
use tracing::debug;

use crate::error::{CommentError, Result};
use crate::thread::{Comment, CommentThread};

/// Default REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size used when listing comments (the API maximum).
const PER_PAGE: usize = 100;

#[derive(Serialize)]
struct BodyRequest<'a> {
    body: &'a str,
}

/// Authenticated client for one repository.
pub struct GithubClient {
    client: Client,
    api_url: String,
    repository: String,
}

impl GithubClient {
    /// Creates a client for `repository` (`owner/name`).
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(api_url: &str, repository: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            CommentError::InvalidEnv {
                name: "GITHUB_TOKEN",
                value: "<redacted>".to_string(),
            }
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .user_agent(concat!("cireport/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repository: repository.to_string(),
        })
    }

    /// The comment thread of pull request `number`.
    pub fn pull_request(&self, number: u64) -> PullRequestComments<'_> {
        PullRequestComments {
            client: self,
            number,
        }
    }

    fn issue_comments_url(&self, number: u64) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_url, self.repository, number
        )
    }

    fn comment_url(&self, id: u64) -> String {
        format!(
            "{}/repos/{}/issues/comments/{}",
            self.api_url, self.repository, id
        )
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().unwrap_or_default();
        Err(CommentError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Comments of one pull request.
pub struct PullRequestComments<'a> {
    client: &'a GithubClient,
    number: u64,
}

impl CommentThread for PullRequestComments<'_> {
    fn list(&self) -> Result<Vec<Comment>> {
        let url = self.client.issue_comments_url(self.number);
        let mut comments = Vec::new();
        let mut page = 1usize;
        loop {
            let request = self.client.client.get(&url).query(&[
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            let batch: Vec<Comment> = self.client.send(request)?.json()?;
            let done = batch.len() < PER_PAGE;
            comments.extend(batch);
            if done {
                break;
            }
            page += 1;
        }
        debug!(pr = self.number, count = comments.len(), "listed comments");
        Ok(comments)
    }

    fn create(&self, body: &str) -> Result<Comment> {
        let request = self
            .client
            .client
            .post(self.client.issue_comments_url(self.number))
            .json(&BodyRequest { body });
        Ok(self.client.send(request)?.json()?)
    }

    fn edit(&self, id: u64, body: &str) -> Result<()> {
        let request = self
            .client
            .client
            .patch(self.client.comment_url(id))
            .json(&BodyRequest { body });
        self.client.send(request)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn urls_follow_rest_layout() {
        let client = GithubClient::new("https://api.github.com/", "acme/repo", "t").unwrap();
        assert_eq!(
            client.issue_comments_url(12),
            "https://api.github.com/repos/acme/repo/issues/12/comments"
        );
        assert_eq!(
            client.comment_url(99),
            "https://api.github.com/repos/acme/repo/issues/comments/99"
        );
    }

    #[test]
    fn token_with_newline_is_rejected() {
        assert!(matches!(
            GithubClient::new(DEFAULT_API_URL, "acme/repo", "bad\ntoken"),
            Err(CommentError::InvalidEnv { name: "GITHUB_TOKEN", .. })
        ));
    }

    #[test]
    fn comment_without_body_decodes() {
        let comment: Comment =
            serde_json::from_str(r#"{"id": 5, "user": {"login": "bot"}}"#).unwrap();
        assert_eq!(comment.id, 5);
        assert!(comment.body.is_empty());
    }
}
