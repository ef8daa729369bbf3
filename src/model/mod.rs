//! Stored records and their transport shape.

mod people;
mod planet;
mod user;

pub use people::People;
pub use planet::Planet;
pub use user::User;

use serde::Serialize;
use serde_json::Value;

/// Everything a user has favorited, as returned by `GET /users/favorites`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Favorites {
    pub planets: Vec<Planet>,
    pub people: Vec<People>,
    /// Opaque rows; there is no vehicle entity behind them.
    pub vehicles: Vec<Value>,
}
