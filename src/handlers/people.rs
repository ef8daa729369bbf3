//! People listing, lookup, and partial update.

use crate::error::AppError;
use crate::patch::{parse_body, PeopleChanges};
use crate::state::AppState;
use super::ids::PeopleId;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// GET /people
pub async fn list_people(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let people = state.store.list_people().await?;
    Ok((StatusCode::OK, Json(people)))
}

/// GET /people/:id
pub async fn get_people(
    State(state): State<AppState>,
    PeopleId(id): PeopleId,
) -> Result<impl IntoResponse, AppError> {
    let person = state
        .store
        .people(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Person not found".into()))?;
    Ok((StatusCode::OK, Json(person)))
}

/// PUT /people/:id. Only recognized fields selected by the update policy are written.
pub async fn update_people(
    State(state): State<AppState>,
    PeopleId(id): PeopleId,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let mut person = state
        .store
        .people(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Person not found".into()))?;
    let body = parse_body(&body)?;
    let changes = PeopleChanges::from_body(&body, state.update_policy)?;
    if !changes.apply(&mut person) {
        tracing::debug!(id, "people update with no changes");
        return Ok((StatusCode::OK, Json(person)));
    }
    let saved = state
        .store
        .save_people(&person)
        .await?
        .ok_or_else(|| AppError::NotFound("Person not found".into()))?;
    Ok((StatusCode::OK, Json(saved)))
}
