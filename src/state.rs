//! Shared application state for all routes.

use crate::auth::AuthKeys;
use crate::config::Config;
use crate::patch::UpdatePolicy;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub auth: Arc<AuthKeys>,
    pub update_policy: UpdatePolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        AppState {
            store,
            auth: Arc::new(AuthKeys::new(&config.jwt_secret, config.token_ttl)),
            update_policy: config.update_policy,
        }
    }
}
