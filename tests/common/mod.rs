//! Shared fixtures: a seeded in-memory store behind the full router.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use starwars_blog_api::{app, issue_token, App, AppState, Config, MemoryStore, People, Planet, Store, UpdatePolicy, User};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: App,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub luke: User,
    pub leia: User,
    pub skywalker: People,
    pub vader: People,
    pub tatooine: Planet,
    pub hoth: Planet,
}

impl TestApp {
    pub fn token_for(&self, user_id: i64) -> String {
        issue_token(&self.state.auth, user_id).unwrap()
    }

    pub async fn request(&self, method: Method, path: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        send(&self.router, method, path, token, body.map(|b| b.to_string())).await
    }

    pub async fn request_raw(&self, method: Method, path: &str, body: &str) -> (StatusCode, Value) {
        send(&self.router, method, path, None, Some(body.to_string())).await
    }
}

pub fn test_config(policy: UpdatePolicy) -> Config {
    Config {
        jwt_secret: "integration-secret".into(),
        update_policy: policy,
        ..Config::default()
    }
}

pub async fn seed(store: &MemoryStore) -> (User, User, People, People, Planet, Planet) {
    let luke = store.insert_user("luke@rebellion.org", "blue-milk").await;
    let leia = store.insert_user("leia@rebellion.org", "alderaan").await;
    let skywalker = store
        .insert_people(People {
            birth_year: Some("19BBY".into()),
            species: Some("Human".into()),
            height: Some(172),
            mass: Some(77),
            gender: Some("male".into()),
            hair_color: Some("blond".into()),
            skin_color: Some("fair".into()),
            homeworld: Some("Tatooine".into()),
            ..People::named("Luke Skywalker")
        })
        .await;
    let vader = store
        .insert_people(People {
            height: Some(202),
            mass: Some(136),
            ..People::named("Darth Vader")
        })
        .await;
    let tatooine = store
        .insert_planet(Planet {
            population: Some(200_000),
            rotation_period: Some(23),
            orbital_period: Some(304),
            diameter: Some(10_465),
            gravity: Some("1 standard".into()),
            terrain: Some("desert".into()),
            surface: Some("1".into()),
            climate: Some("arid".into()),
            ..Planet::named("Tatooine")
        })
        .await;
    let hoth = store
        .insert_planet(Planet {
            climate: Some("frozen".into()),
            ..Planet::named("Hoth")
        })
        .await;
    (luke, leia, skywalker, vader, tatooine, hoth)
}

pub async fn setup() -> TestApp {
    setup_with(UpdatePolicy::Truthy).await
}

pub async fn setup_with(policy: UpdatePolicy) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let (luke, leia, skywalker, vader, tatooine, hoth) = seed(&store).await;
    let state = AppState::new(store.clone(), &test_config(policy));
    TestApp {
        router: app(state.clone()),
        state,
        store,
        luke,
        leia,
        skywalker,
        vader,
        tatooine,
        hoth,
    }
}

/// Router over an arbitrary store, e.g. one that fails on writes.
pub fn router_over(store: Arc<dyn Store>) -> (App, AppState) {
    let state = AppState::new(store, &test_config(UpdatePolicy::Truthy));
    (app(state.clone()), state)
}

pub async fn send(
    router: &App,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<String>,
) -> (StatusCode, Value) {
    let authorization = token.map(|t| format!("Bearer {}", t));
    send_with_authorization(router, method, path, authorization.as_deref(), body).await
}

/// Like `send`, with the raw `Authorization` header value.
pub async fn send_with_authorization(
    router: &App,
    method: Method,
    path: &str,
    authorization: Option<&str>,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(path);
    if let Some(value) = authorization {
        request = request.header(header::AUTHORIZATION, value);
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}
