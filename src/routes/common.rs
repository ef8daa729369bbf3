//! Service routes: liveness, readiness against the store, build identity.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// Shared body of every service route.
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

impl ServiceStatus {
    fn up() -> Self {
        ServiceStatus {
            status: "ok",
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ServiceStatus>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ServiceStatus {
                database: Some("ok"),
                ..ServiceStatus::up()
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ServiceStatus {
                    status: "degraded",
                    database: Some("unavailable"),
                    ..ServiceStatus::up()
                }),
            )
        }
    }
}

/// `/health` and `/version` answer without touching the store; `/ready` pings it.
pub fn service_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(ServiceStatus::up()) }))
        .route("/version", get(|| async { Json(ServiceStatus::up()) }))
        .route("/ready", get(ready))
        .with_state(state)
}
