//! Favorites of the bearer identity: listing, add, and remove.
//!
//! Checks run in a fixed order: identity (401), entity (404), membership (400), commit (500).

use crate::auth::BearerIdentity;
use crate::error::AppError;
use crate::model::{People, Planet};
use crate::state::AppState;
use crate::store::FavoriteTarget;
use super::ids::{PeopleId, PlanetId};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(untagged)]
enum Favorited {
    Planet(Planet),
    People(People),
}

fn label(target: FavoriteTarget) -> &'static str {
    match target {
        FavoriteTarget::Planet(_) => "Planet",
        FavoriteTarget::People(_) => "Person",
    }
}

async fn lookup(state: &AppState, target: FavoriteTarget) -> Result<Favorited, AppError> {
    let found = match target {
        FavoriteTarget::Planet(id) => state.store.planet(id).await?.map(Favorited::Planet),
        FavoriteTarget::People(id) => state.store.people(id).await?.map(Favorited::People),
    };
    found.ok_or_else(|| AppError::NotFound(format!("{} not found", label(target))))
}

async fn add(
    state: &AppState,
    BearerIdentity(user_id): BearerIdentity,
    target: FavoriteTarget,
) -> Result<(StatusCode, Json<Favorited>), AppError> {
    let entity = lookup(state, target).await?;
    if !state.store.add_favorite(user_id, target).await? {
        return Err(AppError::Conflict(format!("{} already in favorites", label(target))));
    }
    tracing::debug!(user_id, ?target, "favorite added");
    Ok((StatusCode::CREATED, Json(entity)))
}

async fn remove(
    state: &AppState,
    BearerIdentity(user_id): BearerIdentity,
    target: FavoriteTarget,
) -> Result<(StatusCode, Json<Favorited>), AppError> {
    let entity = lookup(state, target).await?;
    if !state.store.remove_favorite(user_id, target).await? {
        return Err(AppError::Conflict(format!("{} not in favorites", label(target))));
    }
    tracing::debug!(user_id, ?target, "favorite removed");
    Ok((StatusCode::OK, Json(entity)))
}

/// GET /users/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    BearerIdentity(user_id): BearerIdentity,
) -> Result<impl IntoResponse, AppError> {
    let favorites = state.store.favorites(user_id).await?;
    Ok((StatusCode::OK, Json(favorites)))
}

/// POST /favorite/planet/:id
pub async fn add_planet_favorite(
    State(state): State<AppState>,
    identity: BearerIdentity,
    PlanetId(id): PlanetId,
) -> Result<impl IntoResponse, AppError> {
    add(&state, identity, FavoriteTarget::Planet(id)).await
}

/// POST /favorite/peoples/:id
pub async fn add_people_favorite(
    State(state): State<AppState>,
    identity: BearerIdentity,
    PeopleId(id): PeopleId,
) -> Result<impl IntoResponse, AppError> {
    add(&state, identity, FavoriteTarget::People(id)).await
}

/// DELETE /favorite/planet/:id
pub async fn remove_planet_favorite(
    State(state): State<AppState>,
    identity: BearerIdentity,
    PlanetId(id): PlanetId,
) -> Result<impl IntoResponse, AppError> {
    remove(&state, identity, FavoriteTarget::Planet(id)).await
}

/// DELETE /favorite/peoples/:id
pub async fn remove_people_favorite(
    State(state): State<AppState>,
    identity: BearerIdentity,
    PeopleId(id): PeopleId,
) -> Result<impl IntoResponse, AppError> {
    remove(&state, identity, FavoriteTarget::People(id)).await
}
