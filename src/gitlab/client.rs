use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;

use crate::config::GitLabConfig;
use crate::error::{AppError, Result};
use crate::models::CommitRange;

/// Records requested per upstream page (GitLab's maximum).
pub const UPSTREAM_PAGE_SIZE: usize = 100;

const PRIVATE_TOKEN: &str = "private-token";

/// Thin wrapper over the GitLab REST API. Built once at startup and shared
/// read-only between requests.
pub struct GitLabClient {
    http: Client,
    pub config: GitLabConfig,
}

impl GitLabClient {
    pub fn new(config: GitLabConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(token).map_err(|_| {
                AppError::Config("GITLAB_TOKEN is not a valid header value".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(PRIVATE_TOKEN, value);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("gitlab-digest/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn commits_url(&self, project_id: &str) -> String {
        // Namespaced paths like "group/app" must travel as one segment
        format!(
            "{}/projects/{}/repository/commits",
            self.config.api_url,
            urlencoding::encode(project_id)
        )
    }

    /// Fetch one raw page of commits. Records are left as JSON so a single
    /// malformed entry can be skipped by the caller without losing the page.
    pub async fn fetch_commit_page(
        &self,
        range: &CommitRange<'_>,
        page: usize,
    ) -> Result<Vec<Value>> {
        let url = self.commits_url(range.project_id);
        let since = day_start(range.start_date);
        let until = day_end(range.end_date);
        let per_page = UPSTREAM_PAGE_SIZE.to_string();
        let page = page.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("ref", range.branch),
                ("since", since.as_str()),
                ("until", until.as_str()),
                ("all", "false"),
                ("per_page", per_page.as_str()),
                ("page", page.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<Vec<Value>>().await.map_err(|e| {
            if e.is_timeout() {
                AppError::from(e)
            } else {
                AppError::UpstreamPayload(format!("expected a JSON array of commits: {}", e))
            }
        })
    }
}

fn day_start(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}

fn day_end(date: NaiveDate) -> String {
    format!("{}T23:59:59Z", date.format("%Y-%m-%d"))
}
