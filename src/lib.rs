//! blogpessoal: personal-blog REST backend (posts, themes, users) with bcrypt passwords and JWT auth.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use app::build_app;
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
