//! Bearer-token identity for the favorites routes (HS256 JWT, `sub` = user id).

use crate::error::{AppError, TokenError};
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Signing material shared by every request.
#[derive(Clone)]
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl AuthKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        AuthKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {}", e)))?;
        Ok(data.claims)
    }
}

/// `sub` may be a number or a numeric string; both identify the same user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Value,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        match &self.sub {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Mint an access token for `user_id` valid for the configured lifetime.
pub fn issue_token(keys: &AuthKeys, user_id: i64) -> Result<String, TokenError> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: Value::String(user_id.to_string()),
        iat: now,
        exp: now + keys.ttl.as_secs() as i64,
    };
    Ok(encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)?)
}

/// Token from an `Authorization` value. The scheme name is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty()).then_some(token)
}

/// Id of an existing user, taken from a validated `Authorization: Bearer` token.
#[derive(Clone, Copy, Debug)]
pub struct BearerIdentity(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for BearerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization Header".into()))?;
        let token = bearer_token(header)
            .ok_or_else(|| AppError::Unauthorized("Missing 'Bearer' type in Authorization header".into()))?;
        let claims = state.auth.decode(token)?;
        let user = match claims.user_id() {
            Some(id) => state.store.user(id).await?,
            None => None,
        };
        let user = user.ok_or_else(|| AppError::Unauthorized("User not found".into()))?;
        tracing::debug!(user_id = user.id, "bearer identity");
        Ok(BearerIdentity(user.id))
    }
}
