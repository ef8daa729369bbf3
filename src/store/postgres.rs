//! PostgreSQL-backed store. One transaction per mutation; dropping it uncommitted rolls back.

use super::{FavoriteTarget, Store};
use crate::error::AppError;
use crate::model::{Favorites, People, Planet, User};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

const PEOPLE_COLUMNS: &str =
    "id, name, birth_year, species, height, mass, gender, hair_color, skin_color, homeworld";
const PLANET_COLUMNS: &str =
    "id, name, population, rotation_period, orbital_period, diameter, gravity, terrain, surface, climate";
const USER_COLUMNS: &str = "id, email, password, is_active";

/// Association table and its entity column.
fn association(target: FavoriteTarget) -> (&'static str, &'static str) {
    match target {
        FavoriteTarget::Planet(_) => ("favorite_planets", "planet_id"),
        FavoriteTarget::People(_) => ("favorite_people", "people_id"),
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_people(&self) -> Result<Vec<People>, AppError> {
        let sql = format!("SELECT {} FROM people ORDER BY id", PEOPLE_COLUMNS);
        Ok(sqlx::query_as::<_, People>(&sql).fetch_all(&self.pool).await?)
    }

    async fn people(&self, id: i64) -> Result<Option<People>, AppError> {
        let sql = format!("SELECT {} FROM people WHERE id = $1", PEOPLE_COLUMNS);
        Ok(sqlx::query_as::<_, People>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn save_people(&self, person: &People) -> Result<Option<People>, AppError> {
        let sql = format!(
            "UPDATE people SET name = $2, birth_year = $3, species = $4, height = $5, mass = $6, \
             gender = $7, hair_color = $8, skin_color = $9, homeworld = $10 \
             WHERE id = $1 RETURNING {}",
            PEOPLE_COLUMNS
        );
        tracing::debug!(id = person.id, "update people");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, People>(&sql)
            .bind(person.id)
            .bind(&person.name)
            .bind(&person.birth_year)
            .bind(&person.species)
            .bind(person.height)
            .bind(person.mass)
            .bind(&person.gender)
            .bind(&person.hair_color)
            .bind(&person.skin_color)
            .bind(&person.homeworld)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        let sql = format!("SELECT {} FROM planets ORDER BY id", PLANET_COLUMNS);
        Ok(sqlx::query_as::<_, Planet>(&sql).fetch_all(&self.pool).await?)
    }

    async fn planet(&self, id: i64) -> Result<Option<Planet>, AppError> {
        let sql = format!("SELECT {} FROM planets WHERE id = $1", PLANET_COLUMNS);
        Ok(sqlx::query_as::<_, Planet>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn save_planet(&self, planet: &Planet) -> Result<Option<Planet>, AppError> {
        let sql = format!(
            "UPDATE planets SET name = $2, population = $3, rotation_period = $4, orbital_period = $5, \
             diameter = $6, gravity = $7, terrain = $8, surface = $9, climate = $10 \
             WHERE id = $1 RETURNING {}",
            PLANET_COLUMNS
        );
        tracing::debug!(id = planet.id, "update planet");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Planet>(&sql)
            .bind(planet.id)
            .bind(&planet.name)
            .bind(planet.population)
            .bind(planet.rotation_period)
            .bind(planet.orbital_period)
            .bind(planet.diameter)
            .bind(&planet.gravity)
            .bind(&planet.terrain)
            .bind(&planet.surface)
            .bind(&planet.climate)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    async fn user(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn favorites(&self, user_id: i64) -> Result<Favorites, AppError> {
        let planets_sql = format!(
            "SELECT {} FROM planets WHERE id IN (SELECT planet_id FROM favorite_planets WHERE user_id = $1) ORDER BY id",
            PLANET_COLUMNS
        );
        let people_sql = format!(
            "SELECT {} FROM people WHERE id IN (SELECT people_id FROM favorite_people WHERE user_id = $1) ORDER BY id",
            PEOPLE_COLUMNS
        );
        let planets = sqlx::query_as::<_, Planet>(&planets_sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        let people = sqlx::query_as::<_, People>(&people_sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        let vehicles = sqlx::query_scalar::<_, Value>(
            "SELECT payload FROM favorite_vehicles WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(Favorites {
            planets,
            people,
            vehicles,
        })
    }

    async fn add_favorite(&self, user_id: i64, target: FavoriteTarget) -> Result<bool, AppError> {
        let (table, column) = association(target);
        let sql = format!(
            "INSERT INTO {} (user_id, {}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            table, column
        );
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(target.id())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() == 1)
    }

    async fn remove_favorite(&self, user_id: i64, target: FavoriteTarget) -> Result<bool, AppError> {
        let (table, column) = association(target);
        let sql = format!("DELETE FROM {} WHERE user_id = $1 AND {} = $2", table, column);
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(target.id())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() == 1)
    }
}
