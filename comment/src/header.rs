//! The logical key of a status comment and the header token derived from it.

/// Identifies the one comment an invocation appends to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentKey {
    /// Pull request number.
    pub pr_number: u64,
    /// Workflow run number.
    pub run_number: u64,
    /// Build preset label.
    pub build_preset: String,
    /// True if the run only simulates a real result.
    pub dry_run: bool,
}

impl CommentKey {
    /// The first line of the comment body.
    ///
    /// Booleans are spelled `True`/`False` so comments posted by earlier
    /// versions of the tool keep matching.
    pub fn header(&self) -> String {
        format!(
            "<!-- status pr={}, run={}, build_preset={}, dry_run={} -->",
            self.pr_number,
            self.run_number,
            self.build_preset,
            if self.dry_run { "True" } else { "False" }
        )
    }

    /// Returns true if `body` belongs to this key.
    pub fn matches(&self, body: &str) -> bool {
        body.starts_with(&self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> CommentKey {
        CommentKey {
            pr_number: 1234,
            run_number: 56,
            build_preset: "release-asan".to_string(),
            dry_run: false,
        }
    }

    #[test]
    fn header_is_deterministic() {
        assert_eq!(
            key().header(),
            "<!-- status pr=1234, run=56, build_preset=release-asan, dry_run=False -->"
        );
        assert_eq!(key().header(), key().header());
    }

    #[test]
    fn every_key_field_changes_the_header() {
        let base = key().header();
        let variants = [
            CommentKey { pr_number: 1, ..key() },
            CommentKey { run_number: 57, ..key() },
            CommentKey { build_preset: "release-tsan".into(), ..key() },
            CommentKey { dry_run: true, ..key() },
        ];
        for variant in variants {
            assert_ne!(variant.header(), base);
        }
    }

    #[test]
    fn matches_requires_exact_prefix() {
        let body = format!("{}\nrest", key().header());
        assert!(key().matches(&body));
        assert!(!key().matches(&format!(" {body}")));
        assert!(!CommentKey { run_number: 5, ..key() }.matches(&body));
    }
}
