//! Storage seam between handlers and the database.

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::ensure_schema;

use crate::error::AppError;
use crate::model::{Favorites, People, Planet, User};
use async_trait::async_trait;

/// One side of a favorites association.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoriteTarget {
    Planet(i64),
    People(i64),
}

impl FavoriteTarget {
    pub fn id(&self) -> i64 {
        match self {
            FavoriteTarget::Planet(id) | FavoriteTarget::People(id) => *id,
        }
    }
}

/// Listings are full scans ordered by id. Lookups return `None` for unknown ids.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_people(&self) -> Result<Vec<People>, AppError>;
    async fn people(&self, id: i64) -> Result<Option<People>, AppError>;
    /// Overwrite every descriptive column of an existing row. `None` if the row is gone.
    async fn save_people(&self, person: &People) -> Result<Option<People>, AppError>;

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError>;
    async fn planet(&self, id: i64) -> Result<Option<Planet>, AppError>;
    async fn save_planet(&self, planet: &Planet) -> Result<Option<Planet>, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn user(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn favorites(&self, user_id: i64) -> Result<Favorites, AppError>;
    /// Insert the association if absent. Returns false when it already existed.
    async fn add_favorite(&self, user_id: i64, target: FavoriteTarget) -> Result<bool, AppError>;
    /// Delete the association if present. Returns false when there was nothing to remove.
    async fn remove_favorite(&self, user_id: i64, target: FavoriteTarget) -> Result<bool, AppError>;
}
