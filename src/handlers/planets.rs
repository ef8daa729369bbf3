//! Planet listing, lookup, and partial update.

use crate::error::AppError;
use crate::patch::{parse_body, PlanetChanges};
use crate::state::AppState;
use super::ids::PlanetId;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// GET /planets
pub async fn list_planets(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let planets = state.store.list_planets().await?;
    Ok((StatusCode::OK, Json(planets)))
}

/// GET /planets/:id
pub async fn get_planet(
    State(state): State<AppState>,
    PlanetId(id): PlanetId,
) -> Result<impl IntoResponse, AppError> {
    let planet = state
        .store
        .planet(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Planet not found".into()))?;
    Ok((StatusCode::OK, Json(planet)))
}

/// PUT /planet/:id
pub async fn update_planet(
    State(state): State<AppState>,
    PlanetId(id): PlanetId,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let mut planet = state
        .store
        .planet(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Planet not found".into()))?;
    let body = parse_body(&body)?;
    let changes = PlanetChanges::from_body(&body, state.update_policy)?;
    if !changes.apply(&mut planet) {
        return Ok((StatusCode::OK, Json(planet)));
    }
    let saved = state
        .store
        .save_planet(&planet)
        .await?
        .ok_or_else(|| AppError::NotFound("Planet not found".into()))?;
    Ok((StatusCode::OK, Json(saved)))
}
