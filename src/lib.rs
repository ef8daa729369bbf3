//! REST API over people, planets, users, and per-user favorites.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod patch;
pub mod routes;
pub mod state;
pub mod store;

pub use auth::{issue_token, AuthKeys, BearerIdentity};
pub use config::Config;
pub use error::{AppError, ConfigError, TokenError};
pub use model::{Favorites, People, Planet, User};
pub use patch::UpdatePolicy;
pub use routes::{api_routes, app, service_routes, App};
pub use state::AppState;
pub use store::{ensure_schema, FavoriteTarget, MemoryStore, PgStore, Store};
