use std::sync::Arc;

use crate::auth::Authenticator;
use crate::config::AppConfig;
use crate::error::Result;
use crate::gitlab::{CommitService, GitLabClient};

/// Everything a handler needs. Read-only after startup.
pub struct AppState {
    pub commits: CommitService,
    pub auth: Authenticator,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = GitLabClient::new(config.gitlab.clone())?;
        Ok(Self {
            commits: CommitService::new(client),
            auth: Authenticator::new(config.auth.clone()),
        })
    }
}

pub type SharedState = Arc<AppState>;
