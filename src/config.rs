//! Process configuration read once at startup.
//!
//! Values come from the environment (optionally seeded from a `.env` file by
//! `main`). `from_lookup` takes the lookup as a closure so tests can inject
//! values without touching the process environment.

use std::env;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_GITLAB_API_URL: &str = "https://gitlab.com/api/v4";
pub const DEFAULT_SECRET_KEY: &str = "default_secret_key";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gitlab: GitLabConfig,
    pub auth: AuthConfig,
}

/// Upstream connection settings shared by every request.
#[derive(Debug, Clone)]
pub struct GitLabConfig {
    /// API root, without trailing slash
    pub api_url: String,
    pub token: Option<String>,
    /// Per-request timeout for upstream calls
    pub timeout: Duration,
    /// Upper bound on upstream pages fetched for one query
    pub max_pages: usize,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITLAB_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            max_pages: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub username: String,
    /// Login is disabled when no password is configured
    pub password: Option<String>,
    pub secret_key: String,
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: None,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            token_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut gitlab = GitLabConfig::default();
        if let Some(url) = get("GITLAB_API_URL") {
            gitlab.api_url = url.trim_end_matches('/').to_string();
        }
        gitlab.token = get("GITLAB_TOKEN");
        if let Some(secs) = get("GITLAB_TIMEOUT_SECS") {
            gitlab.timeout = Duration::from_secs(parse_positive("GITLAB_TIMEOUT_SECS", &secs)?);
        }
        if let Some(pages) = get("GITLAB_MAX_PAGES") {
            gitlab.max_pages = parse_positive("GITLAB_MAX_PAGES", &pages)? as usize;
        }

        let mut auth = AuthConfig::default();
        if let Some(username) = get("ADMIN_USERNAME") {
            auth.username = username;
        }
        auth.password = get("ADMIN_PASSWORD");
        if let Some(secret) = get("SECRET_KEY") {
            auth.secret_key = secret;
        }
        if let Some(minutes) = get("ACCESS_TOKEN_EXPIRE_MINUTES") {
            let minutes = parse_positive("ACCESS_TOKEN_EXPIRE_MINUTES", &minutes)?;
            // Token expiry is stored as i64 unix seconds
            let secs = minutes
                .checked_mul(60)
                .filter(|secs| i64::try_from(*secs).is_ok())
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "ACCESS_TOKEN_EXPIRE_MINUTES is too large, got {}",
                        minutes
                    ))
                })?;
            auth.token_ttl = Duration::from_secs(secs);
        }

        Ok(Self { gitlab, auth })
    }

    /// Log settings that are usable but probably unintended.
    pub fn warn_on_weak_settings(&self) {
        if self.gitlab.token.is_none() {
            tracing::warn!("GITLAB_TOKEN is not set, only public projects will be visible");
        }
        if self.auth.secret_key == DEFAULT_SECRET_KEY {
            tracing::warn!("SECRET_KEY is not set, tokens are signed with the built-in default");
        }
        if self.auth.password.is_none() {
            tracing::warn!("ADMIN_PASSWORD is not set, login is disabled");
        }
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::Config(format!(
            "{} must be a positive integer, got {:?}",
            key, value
        ))),
    }
}
