//! Commit retrieval service: the two operations the HTTP layer calls.
//!
//! Both fetch the complete filtered commit set for the range on every call;
//! nothing is cached between requests.

use crate::error::Result;
use crate::gitlab::client::GitLabClient;
use crate::gitlab::pagination::{paginate, render_text};
use crate::models::{CommitQuery, CommitRange, PaginatedCommits, TextExport};

pub struct CommitService {
    client: GitLabClient,
}

impl CommitService {
    pub fn new(client: GitLabClient) -> Self {
        Self { client }
    }

    pub async fn get_commits_paginated(&self, query: &CommitQuery) -> Result<PaginatedCommits> {
        let commits = self
            .client
            .fetch_all_commits(&query.range(), query.author_emails.as_deref())
            .await?;
        Ok(paginate(commits, query.page, query.page_size))
    }

    pub async fn get_commits_as_text(
        &self,
        range: &CommitRange<'_>,
        author_emails: Option<&str>,
    ) -> Result<TextExport> {
        let commits = self.client.fetch_all_commits(range, author_emails).await?;
        Ok(render_text(&commits))
    }
}
