//! The comment thread of one pull request, as seen by the synchronizer.

use serde::Deserialize;

use crate::error::Result;

/// A comment in the thread.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    /// Service-assigned identifier.
    pub id: u64,
    /// Markdown body.
    #[serde(default)]
    pub body: String,
}

/// List, create and edit comments of one pull request.
pub trait CommentThread {
    /// Returns all comments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or rejects the request.
    fn list(&self) -> Result<Vec<Comment>>;

    /// Creates a comment and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or rejects the request.
    fn create(&self, body: &str) -> Result<Comment>;

    /// Replaces the body of comment `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or rejects the request.
    fn edit(&self, id: u64, body: &str) -> Result<()>;
}
