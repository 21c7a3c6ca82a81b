//! Login and session check endpoints.
//!
//! - POST /api/token (form: username, password)
//!   Issues a bearer token for the configured account.
//!
//! - GET /api/users/me
//!   Returns the user behind the bearer token.
//!
//! - GET /api/check-auth
//!   Lets a client confirm its stored token is still accepted.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::auth::CurrentUser;
use crate::error::{AppError, Result};
use crate::models::{AuthStatus, LoginForm, Token, User};
use crate::routes::extract::FormBody;
use crate::state::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/token", post(login_for_access_token))
        .route("/api/users/me", get(read_users_me))
        .route("/api/check-auth", get(check_auth))
        .with_state(state)
}

async fn login_for_access_token(
    State(state): State<SharedState>,
    FormBody(form): FormBody<LoginForm>,
) -> Result<Json<Token>> {
    let user = state
        .auth
        .authenticate(&form.username, &form.password)
        .ok_or_else(|| AppError::Unauthorized("Incorrect username or password".to_string()))?;

    tracing::info!("Issued access token for {}", user.username);
    Ok(Json(state.auth.issue_token(&user)?))
}

async fn read_users_me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

async fn check_auth(CurrentUser(user): CurrentUser) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: true,
        username: user.username,
    })
}
