//! In-process store. Used when no database is configured, and by tests.

use super::{FavoriteTarget, Store};
use crate::error::AppError;
use crate::model::{Favorites, People, Planet, User};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    people: BTreeMap<i64, People>,
    planets: BTreeMap<i64, Planet>,
    /// (user_id, planet_id)
    favorite_planets: BTreeSet<(i64, i64)>,
    /// (user_id, people_id)
    favorite_people: BTreeSet<(i64, i64)>,
    favorite_vehicles: HashMap<i64, Vec<Value>>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn associations(&mut self, target: FavoriteTarget) -> &mut BTreeSet<(i64, i64)> {
        match target {
            FavoriteTarget::Planet(_) => &mut self.favorite_planets,
            FavoriteTarget::People(_) => &mut self.favorite_people,
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user and return it with its assigned id.
    pub async fn insert_user(&self, email: &str, password: &str) -> User {
        let mut t = self.tables.write().await;
        let user = User {
            id: t.next_id(),
            email: email.to_string(),
            password: password.to_string(),
            is_active: true,
        };
        t.users.insert(user.id, user.clone());
        user
    }

    /// Insert a person; the given `id` is replaced by a fresh one.
    pub async fn insert_people(&self, mut person: People) -> People {
        let mut t = self.tables.write().await;
        person.id = t.next_id();
        t.people.insert(person.id, person.clone());
        person
    }

    pub async fn insert_planet(&self, mut planet: Planet) -> Planet {
        let mut t = self.tables.write().await;
        planet.id = t.next_id();
        t.planets.insert(planet.id, planet.clone());
        planet
    }

    pub async fn insert_favorite_vehicle(&self, user_id: i64, payload: Value) {
        let mut t = self.tables.write().await;
        t.favorite_vehicles.entry(user_id).or_default().push(payload);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_people(&self) -> Result<Vec<People>, AppError> {
        Ok(self.tables.read().await.people.values().cloned().collect())
    }

    async fn people(&self, id: i64) -> Result<Option<People>, AppError> {
        Ok(self.tables.read().await.people.get(&id).cloned())
    }

    async fn save_people(&self, person: &People) -> Result<Option<People>, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.people.get_mut(&person.id).map(|row| {
            *row = person.clone();
            row.clone()
        }))
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        Ok(self.tables.read().await.planets.values().cloned().collect())
    }

    async fn planet(&self, id: i64) -> Result<Option<Planet>, AppError> {
        Ok(self.tables.read().await.planets.get(&id).cloned())
    }

    async fn save_planet(&self, planet: &Planet) -> Result<Option<Planet>, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.planets.get_mut(&planet.id).map(|row| {
            *row = planet.clone();
            row.clone()
        }))
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn favorites(&self, user_id: i64) -> Result<Favorites, AppError> {
        let t = self.tables.read().await;
        let planets = t
            .favorite_planets
            .range((user_id, i64::MIN)..=(user_id, i64::MAX))
            .filter_map(|(_, id)| t.planets.get(id).cloned())
            .collect();
        let people = t
            .favorite_people
            .range((user_id, i64::MIN)..=(user_id, i64::MAX))
            .filter_map(|(_, id)| t.people.get(id).cloned())
            .collect();
        let vehicles = t.favorite_vehicles.get(&user_id).cloned().unwrap_or_default();
        Ok(Favorites {
            planets,
            people,
            vehicles,
        })
    }

    async fn add_favorite(&self, user_id: i64, target: FavoriteTarget) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        let exists = match target {
            FavoriteTarget::Planet(id) => t.planets.contains_key(&id),
            FavoriteTarget::People(id) => t.people.contains_key(&id),
        };
        if !exists || !t.users.contains_key(&user_id) {
            return Err(AppError::Persistence(format!(
                "foreign key violation: user {} / {:?}",
                user_id, target
            )));
        }
        Ok(t.associations(target).insert((user_id, target.id())))
    }

    async fn remove_favorite(&self, user_id: i64, target: FavoriteTarget) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.associations(target).remove(&(user_id, target.id())))
    }
}
