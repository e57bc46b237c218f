//! Shared application state for all routes. Built once at startup; services are wired explicitly.

use crate::auth::{Bcrypt, TokenIssuer};
use crate::config::AppConfig;
use crate::service::{AuthService, PostService, ThemeService, UserService};
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub themes: ThemeService,
    pub users: UserService,
    pub posts: PostService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let hasher = Bcrypt::new(config.bcrypt_cost);
        let tokens = Arc::new(TokenIssuer::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
            config.jwt_ttl_secs,
        ));
        let themes = ThemeService::new(store.clone());
        let users = UserService::new(store.clone(), hasher);
        let posts = PostService::new(store.clone(), themes.clone(), users.clone(), config.utc_offset);
        let auth = AuthService::new(users.clone(), hasher, tokens);
        AppState {
            config: Arc::new(config),
            store,
            themes,
            users,
            posts,
            auth,
        }
    }
}
