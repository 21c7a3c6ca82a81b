//! Bearer-token authentication for the API.
//!
//! A single account is configured through the environment. Tokens are
//! `base64url(claims).base64url(hmac_sha256(secret, claims))` where the claims
//! are `{"sub": username, "exp": unix_seconds}`.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::AuthConfig;
use crate::error::{AppError, Result};
use crate::models::{Token, User};
use crate::state::SharedState;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Check credentials against the configured account.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let expected = self.config.password.as_deref()?;
        let user_ok = self.digest_eq(username, &self.config.username);
        let pass_ok = self.digest_eq(password, expected);
        if user_ok && pass_ok {
            Some(User {
                username: self.config.username.clone(),
            })
        } else {
            None
        }
    }

    pub fn issue_token(&self, user: &User) -> Result<Token> {
        let access_token = self.issue_token_at(user, chrono::Utc::now().timestamp())?;
        Ok(Token {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    pub fn issue_token_at(&self, user: &User, now: i64) -> Result<String> {
        let exp = i64::try_from(self.config.token_ttl.as_secs())
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| {
                AppError::Internal("Token lifetime overflows expiry time".to_string())
            })?;
        let claims = Claims {
            sub: user.username.clone(),
            exp,
        };
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AppError::Internal(format!("Failed to encode token claims: {}", e)))?;

        let signature = self.mac()?.chain_update(&payload).finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    pub fn verify(&self, token: &str) -> Result<User> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> Result<User> {
        let invalid = || AppError::Unauthorized("Could not validate credentials".to_string());

        let (payload_b64, signature_b64) = token.split_once('.').ok_or_else(invalid)?;
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).map_err(|_| invalid())?;
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|_| invalid())?;

        self.mac()?
            .chain_update(&payload)
            .verify_slice(&signature)
            .map_err(|_| invalid())?;

        let claims: Claims = serde_json::from_slice(&payload).map_err(|_| invalid())?;
        if claims.exp <= now {
            return Err(AppError::Unauthorized("Token has expired".to_string()));
        }
        if claims.sub != self.config.username {
            return Err(invalid());
        }

        Ok(User { username: claims.sub })
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(self.config.secret_key.as_bytes())
            .map_err(|e| AppError::Internal(format!("Invalid signing key: {}", e)))
    }

    /// Equality on keyed digests; runs in constant time and does not depend
    /// on either input's length.
    fn digest_eq(&self, given: &str, expected: &str) -> bool {
        let (Ok(expected_mac), Ok(given_mac)) = (self.mac(), self.mac()) else {
            return false;
        };
        let expected_tag = expected_mac.chain_update(expected).finalize().into_bytes();
        given_mac.chain_update(given).verify_slice(&expected_tag).is_ok()
    }
}

/// The caller behind a valid `Authorization: Bearer` header.
pub struct CurrentUser(pub User);

impl FromRequestParts<SharedState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Expected a bearer token".to_string()))?;

        let user = state.auth.verify(token)?;
        Ok(CurrentUser(user))
    }
}
