//! Commit DTOs and the query used to request them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const MAX_PAGE_SIZE: usize = 100;

/// One commit as returned by the GitLab commits endpoint. Unknown upstream
/// fields are ignored; the remaining ones are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub author_name: String,
    pub author_email: String,
    pub created_at: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedCommits {
    pub items: Vec<Commit>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextExport {
    pub content: String,
}

/// Branch and date window of a commit lookup.
#[derive(Debug, Clone)]
pub struct CommitRange<'a> {
    pub project_id: &'a str,
    pub branch: &'a str,
    pub start_date: NaiveDate,
    /// Inclusive, up to 23:59:59 UTC
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitQuery {
    pub project_id: String,
    pub branch: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub author_emails: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    10
}

impl CommitQuery {
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(AppError::InvalidQuery("project_id must not be empty".to_string()));
        }
        if self.branch.trim().is_empty() {
            return Err(AppError::InvalidQuery("branch must not be empty".to_string()));
        }
        if self.page < 1 {
            return Err(AppError::InvalidQuery("page must be at least 1".to_string()));
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(AppError::InvalidQuery(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if self.start_date > self.end_date {
            return Err(AppError::InvalidQuery(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }

    pub fn range(&self) -> CommitRange<'_> {
        CommitRange {
            project_id: self.project_id.trim(),
            branch: self.branch.trim(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
