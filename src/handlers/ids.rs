//! Numeric `:id` path segments. Anything that is not a non-negative integer
//! is reported as a missing record, never as a bad request.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

async fn numeric_id<S: Send + Sync>(parts: &mut Parts, state: &S, missing: &str) -> Result<i64, AppError> {
    let not_found = || AppError::NotFound(missing.to_string());
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|_| not_found())?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found());
    }
    raw.parse().map_err(|_| not_found())
}

/// Id of a people record in the request path.
#[derive(Clone, Copy, Debug)]
pub struct PeopleId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PeopleId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        numeric_id(parts, state, "Person not found").await.map(PeopleId)
    }
}

/// Id of a planet in the request path.
#[derive(Clone, Copy, Debug)]
pub struct PlanetId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PlanetId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        numeric_id(parts, state, "Planet not found").await.map(PlanetId)
    }
}
