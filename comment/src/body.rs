//! Comment body composition, independent of any network access.

use crate::header::CommentKey;

/// Notice inserted into first-run bodies of dry runs.
pub const DRY_RUN_NOTICE: [&str; 2] = [
    "> [!NOTE]",
    "> This is a simulation, not a real result. If you see this, everything is as it should be.",
];

/// Notice inserted into every first-run body.
pub const AUTO_UPDATE_NOTICE: [&str; 2] = [
    "> [!NOTE]",
    "> This is an automated comment that will be appended during run.",
];

/// Builds the new comment body.
///
/// With an existing body the section is appended after a blank-line
/// separator. Otherwise a new body starts with the header token, the dry-run
/// notice when applicable, and the auto-update notice.
pub fn compose_body(existing: Option<&str>, key: &CommentKey, section: &[String]) -> String {
    let mut body: Vec<String> = Vec::new();

    match existing {
        Some(existing) => {
            body.push(existing.to_string());
            body.push(String::new());
            body.push(String::new());
        }
        None => {
            body.push(key.header());
            if key.dry_run {
                body.extend(DRY_RUN_NOTICE.iter().map(|s| s.to_string()));
                body.push(String::new());
            }
            body.extend(AUTO_UPDATE_NOTICE.iter().map(|s| s.to_string()));
            body.push(String::new());
        }
    }

    body.extend(section.iter().cloned());
    body.join("\n")
}
