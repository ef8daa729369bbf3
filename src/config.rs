//! Process configuration read from the environment (`.env` is loaded by the binary first).

use crate::error::ConfigError;
use crate::patch::UpdatePolicy;
use std::time::Duration;

/// Used when `JWT_SECRET_KEY` is unset. Only suitable for local development.
pub const DEV_JWT_SECRET: &str = "change-me-dev-secret";

#[derive(Clone, Debug)]
pub struct Config {
    /// Postgres connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub host: String,
    pub port: u16,
    pub update_policy: UpdatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            max_connections: 5,
            jwt_secret: DEV_JWT_SECRET.into(),
            token_ttl: Duration::from_secs(3600),
            host: "0.0.0.0".into(),
            port: 3000,
            update_policy: UpdatePolicy::Truthy,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let jwt_secret = match get("JWT_SECRET_KEY") {
            Some(s) => s,
            None => {
                tracing::warn!("JWT_SECRET_KEY not set, using development secret");
                defaults.jwt_secret
            }
        };

        Ok(Config {
            database_url: get("DATABASE_URL"),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), defaults.max_connections)?,
            jwt_secret,
            token_ttl: Duration::from_secs(parse_or(
                "JWT_TTL_SECONDS",
                get("JWT_TTL_SECONDS"),
                defaults.token_ttl.as_secs(),
            )?),
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            update_policy: parse_or("PARTIAL_UPDATE", get("PARTIAL_UPDATE"), defaults.update_policy)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidVar { name, value }),
    }
}
