//! Commit filters applied after fetching.
//!
//! - Merge commits are recognised by message text, not by parent count.
//! - Author filtering keeps only commits whose author email is in a
//!   comma-separated allow list, compared case-insensitively.

use std::collections::HashSet;

use crate::models::Commit;

/// Checked in order against both the title and the full message.
const MERGE_INDICATORS: [&str; 3] = [
    "Merge branch",
    "Merge remote-tracking branch",
    "Merge pull request",
];

pub fn is_merge_commit(title: &str, message: &str) -> bool {
    MERGE_INDICATORS
        .iter()
        .any(|indicator| title.contains(indicator) || message.contains(indicator))
}

/// Split a comma-separated email list into trimmed, lower-cased entries.
/// Blank entries are dropped.
pub fn parse_author_emails(author_emails: &str) -> HashSet<String> {
    author_emails
        .split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}

/// Keep commits authored by one of the given emails. A missing or
/// effectively empty list leaves the commits untouched.
pub fn filter_by_author_emails(commits: Vec<Commit>, author_emails: Option<&str>) -> Vec<Commit> {
    let Some(author_emails) = author_emails else {
        return commits;
    };

    let allowed = parse_author_emails(author_emails);
    if allowed.is_empty() {
        return commits;
    }

    commits
        .into_iter()
        .filter(|commit| allowed.contains(&commit.author_email.to_lowercase()))
        .collect()
}
