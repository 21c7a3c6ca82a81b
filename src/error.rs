//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to appropriate HTTP responses
//! with JSON error bodies.
//!
//! Error mappings:
//! - `InvalidQuery` → 400
//! - `Unauthorized` → 401
//! - `UpstreamStatus`, `UpstreamPayload`, `UpstreamPageLimit` → 502
//! - `UpstreamTimeout` → 504
//! - `Http`, `Config`, `Internal` → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("GitLab returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Unexpected GitLab response: {0}")]
    UpstreamPayload(String),

    #[error("GitLab pagination exceeded {0} pages")]
    UpstreamPageLimit(usize),

    #[error("GitLab request timed out: {0}")]
    UpstreamTimeout(String),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            let target = err
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "unknown url".to_string());
            AppError::UpstreamTimeout(target)
        } else {
            AppError::Http(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::UpstreamStatus { .. }
            | AppError::UpstreamPayload(_)
            | AppError::UpstreamPageLimit(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Http(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = match &self {
            AppError::Unauthorized(_) => Json(json!({
                "error": self.to_string(),
                "auth_error": true,
            })),
            _ => Json(json!({
                "error": self.to_string(),
            })),
        };

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_display_names_status_and_url() {
        let err = AppError::UpstreamStatus {
            status: 404,
            url: "https://gitlab.example/api/v4/projects/7/commits".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "GitLab returned status 404 for https://gitlab.example/api/v4/projects/7/commits"
        );
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::InvalidQuery("page".into()), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("no token".into()), StatusCode::UNAUTHORIZED),
            (
                AppError::UpstreamStatus { status: 500, url: "u".into() },
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::UpstreamPageLimit(50), StatusCode::BAD_GATEWAY),
            (AppError::UpstreamTimeout("u".into()), StatusCode::GATEWAY_TIMEOUT),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
