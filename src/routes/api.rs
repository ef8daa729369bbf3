//! Resource routes and the sitemap that documents them.

use crate::handlers::{
    add_people_favorite, add_planet_favorite, get_people, get_planet, list_favorites, list_people, list_planets,
    list_users, remove_people_favorite, remove_planet_favorite, update_people, update_planet,
};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    /// Requires `Authorization: Bearer <token>`.
    pub auth: bool,
}

const fn endpoint(method: &'static str, path: &'static str, auth: bool) -> Endpoint {
    Endpoint { method, path, auth }
}

/// Every API route, in the order the sitemap lists them. Must match `api_routes`.
pub const ENDPOINTS: &[Endpoint] = &[
    endpoint("GET", "/", false),
    endpoint("GET", "/people", false),
    endpoint("GET", "/people/:id", false),
    endpoint("PUT", "/people/:id", false),
    endpoint("GET", "/planets", false),
    endpoint("GET", "/planets/:id", false),
    endpoint("PUT", "/planet/:id", false),
    endpoint("GET", "/users", false),
    endpoint("GET", "/users/favorites", true),
    endpoint("POST", "/favorite/planet/:id", true),
    endpoint("DELETE", "/favorite/planet/:id", true),
    endpoint("POST", "/favorite/peoples/:id", true),
    endpoint("DELETE", "/favorite/peoples/:id", true),
];

#[derive(Serialize)]
struct Sitemap {
    endpoints: &'static [Endpoint],
}

async fn sitemap() -> Json<Sitemap> {
    Json(Sitemap { endpoints: ENDPOINTS })
}

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(sitemap))
        .route("/people", get(list_people))
        .route("/people/:id", get(get_people).put(update_people))
        .route("/planets", get(list_planets))
        .route("/planets/:id", get(get_planet))
        .route("/planet/:id", put(update_planet))
        .route("/users", get(list_users))
        .route("/users/favorites", get(list_favorites))
        .route(
            "/favorite/planet/:id",
            post(add_planet_favorite).delete(remove_planet_favorite),
        )
        .route(
            "/favorite/peoples/:id",
            post(add_people_favorite).delete(remove_people_favorite),
        )
        .with_state(state)
}
