//! Commit history endpoints. Both require a bearer token.
//!
//! - POST /api/commits
//!   { project_id, branch, start_date, end_date, page?, page_size?, author_emails? }
//!   One page of non-merge commits in the date window.
//!
//! - POST /api/commits/text (same body, paging fields ignored)
//!   All matching commits as numbered `N、author：title` lines.

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};

use crate::auth::CurrentUser;
use crate::error::Result;
use crate::models::{CommitQuery, PaginatedCommits, TextExport};
use crate::routes::extract::JsonBody;
use crate::state::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/commits", post(get_commits))
        .route("/api/commits/text", post(get_commits_text))
        .with_state(state)
}

async fn get_commits(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    JsonBody(query): JsonBody<CommitQuery>,
) -> Result<Json<PaginatedCommits>> {
    query.validate()?;
    tracing::debug!(user = %user.username, ?query, "Commit page requested");

    let result = state.commits.get_commits_paginated(&query).await?;
    Ok(Json(result))
}

async fn get_commits_text(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    JsonBody(query): JsonBody<CommitQuery>,
) -> Result<Json<TextExport>> {
    query.validate()?;
    tracing::debug!(user = %user.username, ?query, "Commit text export requested");

    let export = state
        .commits
        .get_commits_as_text(&query.range(), query.author_emails.as_deref())
        .await?;
    Ok(Json(export))
}

#[cfg(test)]
mod tests {
    use crate::routes::testing::{spawn_app, TestApp};
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upstream_commit(n: usize, author: &str, title: &str) -> Value {
        json!({
            "id": format!("{:040x}", n),
            "short_id": format!("{:08x}", n),
            "title": title,
            "author_name": author,
            "author_email": format!("{}@example.com", author.to_lowercase()),
            "created_at": "2024-07-01T12:00:00.000Z",
            "message": title,
        })
    }

    fn body(extra: Value) -> Value {
        let mut body = json!({
            "project_id": "42",
            "branch": "main",
            "start_date": "2024-07-01",
            "end_date": "2024-07-31",
        });
        if let (Some(target), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            target.extend(extra.clone());
        }
        body
    }

    async fn post(app: &TestApp, route: &str, body: Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}{}", app.base_url, route))
            .bearer_auth(&app.token)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn upstream_with(commits: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/42/repository/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(commits))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn returns_requested_page() {
        let upstream = upstream_with(json!([
            upstream_commit(1, "Ann", "Fix A"),
            upstream_commit(2, "Bob", "Fix B"),
            upstream_commit(3, "Ann", "Merge branch 'f' into 'main'"),
            upstream_commit(4, "Cid", "Fix C"),
        ]))
        .await;
        let app = spawn_app(&upstream.uri()).await;

        let response = post(&app, "/api/commits", body(json!({"page": 2, "page_size": 2}))).await;
        assert_eq!(response.status().as_u16(), 200);

        let page: Value = response.json().await.unwrap();
        assert_eq!(page["total"], 3);
        assert_eq!(page["page"], 2);
        assert_eq!(page["page_size"], 2);
        assert_eq!(page["total_pages"], 2);
        assert_eq!(page["items"][0]["title"], "Fix C");
        assert_eq!(page["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn exports_text_filtered_by_author() {
        let upstream = upstream_with(json!([
            upstream_commit(1, "Ann", "Fix A"),
            upstream_commit(2, "Bob", "Fix B"),
            upstream_commit(3, "Cid", "Fix C"),
        ]))
        .await;
        let app = spawn_app(&upstream.uri()).await;

        let response = post(
            &app,
            "/api/commits/text",
            body(json!({"author_emails": "ANN@example.com, bob@example.com"})),
        )
        .await;

        let export: Value = response.json().await.unwrap();
        assert_eq!(export["content"], "1、Ann：Fix A\n2、Bob：Fix B");
    }

    #[tokio::test]
    async fn invalid_page_size_is_bad_request() {
        let app = spawn_app("http://127.0.0.1:9").await;

        let response = post(&app, "/api/commits", body(json!({"page_size": 500}))).await;
        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn impossible_date_is_bad_request_with_json_error() {
        let app = spawn_app("http://127.0.0.1:9").await;

        let response =
            post(&app, "/api/commits", body(json!({"start_date": "2024-02-30"}))).await;
        assert_eq!(response.status().as_u16(), 400);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("application/json"));

        let error: Value = response.json().await.unwrap();
        assert!(error["error"].as_str().unwrap().contains("start_date"));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request_with_json_error() {
        let app = spawn_app("http://127.0.0.1:9").await;

        let response = post(
            &app,
            "/api/commits/text",
            json!({"branch": "main", "start_date": "2024-07-01", "end_date": "2024-07-31"}),
        )
        .await;
        assert_eq!(response.status().as_u16(), 400);

        let error: Value = response.json().await.unwrap();
        assert!(error["error"].as_str().unwrap().contains("project_id"));
    }

    #[tokio::test]
    async fn non_numeric_page_is_bad_request() {
        let app = spawn_app("http://127.0.0.1:9").await;

        let response = post(&app, "/api/commits", body(json!({"page": "two"}))).await;
        assert_eq!(response.status().as_u16(), 400);
        let error: Value = response.json().await.unwrap();
        assert!(error["error"].is_string());
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&upstream)
            .await;
        let app = spawn_app(&upstream.uri()).await;

        let response = post(&app, "/api/commits", body(json!({}))).await;
        assert_eq!(response.status().as_u16(), 502);
        let error: Value = response.json().await.unwrap();
        assert!(error["error"].as_str().unwrap().contains("401"));
    }

    #[tokio::test]
    async fn requires_bearer_token() {
        let app = spawn_app("http://127.0.0.1:9").await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/commits", app.base_url))
            .json(&body(json!({})))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);
    }
}
