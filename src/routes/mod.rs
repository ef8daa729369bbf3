//! Router assembly.

mod api;
mod common;

pub use api::{api_routes, Endpoint, ENDPOINTS};
pub use common::service_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, normalize_path::NormalizePath, trace::TraceLayer,
};

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// The served application. Trailing slashes are trimmed before routing,
/// so `/people/` and `/people` are the same route.
pub type App = NormalizePath<Router>;

/// Full application: API routes, service routes, and the tower-http layers.
pub fn app(state: AppState) -> App {
    let router = Router::new()
        .merge(service_routes(state.clone()))
        .merge(api_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());
    NormalizePath::trim_trailing_slash(router)
}
