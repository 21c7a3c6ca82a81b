//! API route handlers - maps HTTP endpoints to the commit service.
//!
//! Each submodule defines routes for a feature area:
//! - `auth`: Token issuance and session checks
//! - `commits`: Paginated commit history and plain-text export
//! - `extract`: Body extractors with JSON error responses

pub mod auth;
pub mod commits;
pub mod extract;

use axum::Router;

use crate::state::SharedState;

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .merge(auth::routes(state.clone()))
        .merge(commits::routes(state))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::config::{AppConfig, AuthConfig, GitLabConfig};
    use crate::models::User;
    use crate::state::AppState;

    pub struct TestApp {
        pub base_url: String,
        /// Valid bearer token for the test account
        pub token: String,
    }

    /// Serve the router on an ephemeral port, talking to `gitlab_url` upstream.
    pub async fn spawn_app(gitlab_url: &str) -> TestApp {
        let config = AppConfig {
            gitlab: GitLabConfig {
                api_url: gitlab_url.to_string(),
                token: Some("glpat-test".to_string()),
                timeout: Duration::from_secs(5),
                max_pages: 5,
            },
            auth: AuthConfig {
                username: "admin".to_string(),
                password: Some("s3cret".to_string()),
                secret_key: "route-test-secret".to_string(),
                token_ttl: Duration::from_secs(300),
            },
        };

        let state = Arc::new(AppState::from_config(&config).unwrap());
        let token = state
            .auth
            .issue_token(&User {
                username: "admin".to_string(),
            })
            .unwrap()
            .access_token;

        let app = super::create_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestApp {
            base_url: format!("http://{}", addr),
            token,
        }
    }
}
