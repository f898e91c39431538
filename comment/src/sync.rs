//! Find-or-create of the status comment for one [`CommentKey`].

use cireport_render::{FootnoteStyle, MuteRulesLink};
use cireport_results::Summary;
use tracing::info;

use crate::body::compose_body;
use crate::error::Result;
use crate::header::CommentKey;
use crate::section::{render_section, SectionContext};
use crate::thread::CommentThread;

/// What the synchronizer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A new comment was posted.
    Created(u64),
    /// An existing comment was extended.
    Updated(u64),
}

impl SyncOutcome {
    /// Identifier of the comment written.
    pub fn comment_id(self) -> u64 {
        match self {
            SyncOutcome::Created(id) | SyncOutcome::Updated(id) => id,
        }
    }
}

/// Appends this run's section to the comment for `key`, creating it if needed.
///
/// Nothing is retried: any failure of the thread aborts the synchronization.
///
/// # Errors
///
/// Returns an error if listing, creating, or editing comments fails.
pub fn sync_comment(
    thread: &dyn CommentThread,
    key: &CommentKey,
    summary: &Summary,
    ctx: &SectionContext,
    mute_rules: &MuteRulesLink,
) -> Result<SyncOutcome> {
    let existing = thread.list()?.into_iter().find(|c| key.matches(&c.body));

    match existing {
        Some(comment) => {
            info!(id = comment.id, "found status comment");
            let section = render_section(summary, ctx, FootnoteStyle::Reference, mute_rules);
            let body = compose_body(Some(&comment.body), key, &section);
            thread.edit(comment.id, &body)?;
            info!(id = comment.id, "updated status comment");
            Ok(SyncOutcome::Updated(comment.id))
        }
        None => {
            let section = render_section(summary, ctx, FootnoteStyle::Inline, mute_rules);
            let body = compose_body(None, key, &section);
            let comment = thread.create(&body)?;
            info!(id = comment.id, "created status comment");
            Ok(SyncOutcome::Created(comment.id))
        }
    }
}
