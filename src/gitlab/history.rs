use serde_json::Value;

use crate::error::{AppError, Result};
use crate::gitlab::client::{GitLabClient, UPSTREAM_PAGE_SIZE};
use crate::gitlab::filter::{filter_by_author_emails, is_merge_commit};
use crate::models::{Commit, CommitRange};

impl GitLabClient {
    /// Walk the upstream pages of a branch until a short or empty page.
    ///
    /// Pages are requested one after another. Any failed page aborts the
    /// whole walk; nothing partial is returned. Hitting `max_pages` without
    /// seeing a short page is an error as well.
    pub async fn fetch_raw_commits(&self, range: &CommitRange<'_>) -> Result<Vec<Value>> {
        let max_pages = self.config.max_pages;
        let mut records = Vec::new();

        for page in 1..=max_pages {
            let batch = self.fetch_commit_page(range, page).await?;
            let count = batch.len();
            tracing::debug!(project = range.project_id, page, count, "Fetched commit page");

            records.extend(batch);

            if count < UPSTREAM_PAGE_SIZE {
                tracing::info!(
                    "Fetched {} commits from {}@{} in {} page(s)",
                    records.len(),
                    range.project_id,
                    range.branch,
                    page
                );
                return Ok(records);
            }
        }

        Err(AppError::UpstreamPageLimit(max_pages))
    }

    /// All non-merge commits in the range, narrowed to `author_emails` when
    /// given. Upstream order (newest first) is preserved.
    pub async fn fetch_all_commits(
        &self,
        range: &CommitRange<'_>,
        author_emails: Option<&str>,
    ) -> Result<Vec<Commit>> {
        let records = self.fetch_raw_commits(range).await?;
        let commits = convert_records(records);
        Ok(filter_by_author_emails(commits, author_emails))
    }
}

/// Turn raw upstream records into commits, dropping merges. Records missing
/// expected fields are skipped.
pub fn convert_records(records: Vec<Value>) -> Vec<Commit> {
    let mut commits = Vec::with_capacity(records.len());

    for record in records {
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<no id>")
            .to_string();

        match serde_json::from_value::<Commit>(record) {
            Ok(commit) => {
                if !is_merge_commit(&commit.title, &commit.message) {
                    commits.push(commit);
                }
            }
            Err(e) => {
                tracing::warn!("Skipping malformed commit record {}: {}", id, e);
            }
        }
    }

    commits
}
