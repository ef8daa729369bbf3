//! HTTP handlers for people, planets, users, and favorites.

pub mod favorites;
mod ids;
pub mod people;
pub mod planets;
pub mod users;
pub use favorites::*;
pub use ids::{PeopleId, PlanetId};
pub use people::*;
pub use planets::*;
pub use users::*;
