//! Data access: one repository trait per table, grouped by [`Store`].
//!
//! `PgStore` is the PostgreSQL implementation; `MemoryStore` keeps the same tables in process and
//! enforces the same constraints (unique login, restrict on delete).

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

use crate::error::AppError;
use crate::model::{Post, PostWrite, Relations, Theme, User, UserWrite};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[async_trait]
pub trait ThemeRepository: Send + Sync {
    async fn all_themes(&self) -> Result<Vec<Theme>, AppError>;
    async fn theme_by_id(&self, id: i64) -> Result<Option<Theme>, AppError>;
    /// Case-insensitive substring match on `descricao`.
    async fn themes_by_descricao(&self, needle: &str) -> Result<Vec<Theme>, AppError>;
    /// Insert when `id` is `None`, otherwise update that row.
    async fn save_theme(&self, id: Option<i64>, descricao: &str) -> Result<Theme, AppError>;
    /// Rows affected. `Conflict` while posts still reference the theme.
    async fn delete_theme(&self, id: i64) -> Result<u64, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn all_users(&self) -> Result<Vec<User>, AppError>;
    async fn user_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn user_by_login(&self, usuario: &str) -> Result<Option<User>, AppError>;
    /// Insert when `id` is `None`, otherwise update. `Conflict` when the login is taken.
    async fn save_user(&self, user: UserWrite) -> Result<User, AppError>;
    async fn delete_user(&self, id: i64) -> Result<u64, AppError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn all_posts(&self, load: Relations) -> Result<Vec<Post>, AppError>;
    async fn post_by_id(&self, id: i64, load: Relations) -> Result<Option<Post>, AppError>;
    /// Case-insensitive substring match on `titulo`.
    async fn posts_by_titulo(&self, needle: &str, load: Relations) -> Result<Vec<Post>, AppError>;
    /// Insert when `id` is `None`, otherwise update; `data` is stamped with the current time.
    async fn save_post(&self, post: PostWrite, load: Relations) -> Result<Post, AppError>;
    async fn delete_post(&self, id: i64) -> Result<u64, AppError>;
}

#[async_trait]
pub trait Store: ThemeRepository + UserRepository + PostRepository {
    /// Cheap liveness check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Post as stored: relations are ids.
#[derive(Clone, Debug, sqlx::FromRow)]
pub(crate) struct PostRow {
    pub id: i64,
    pub titulo: String,
    pub texto: String,
    pub data: DateTime<Utc>,
    pub tema_id: i64,
    pub usuario_id: Option<i64>,
}

impl PostRow {
    /// Attach already-loaded relations. Missing entries leave the relation `None`.
    pub(crate) fn into_post(
        self,
        themes: &HashMap<i64, Theme>,
        users: &HashMap<i64, User>,
        load: Relations,
    ) -> Post {
        Post {
            id: self.id,
            titulo: self.titulo,
            texto: self.texto,
            data: self.data.fixed_offset(),
            tema: if load.tema { themes.get(&self.tema_id).cloned() } else { None },
            usuario: match (load.usuario, self.usuario_id) {
                (true, Some(uid)) => users.get(&uid).cloned(),
                _ => None,
            },
        }
    }
}

/// Ids referenced by the rows, deduplicated, for batch-loading relations.
pub(crate) fn referenced_ids(rows: &[PostRow]) -> (Vec<i64>, Vec<i64>) {
    let mut temas: Vec<i64> = rows.iter().map(|r| r.tema_id).collect();
    let mut usuarios: Vec<i64> = rows.iter().filter_map(|r| r.usuario_id).collect();
    temas.sort_unstable();
    temas.dedup();
    usuarios.sort_unstable();
    usuarios.dedup();
    (temas, usuarios)
}

pub(crate) const THEME_IN_USE: &str = "Tema possui postagens vinculadas!";
pub(crate) const USER_IN_USE: &str = "Usuário possui postagens vinculadas!";
pub(crate) const LOGIN_TAKEN: &str = "Usuário já existe!";
pub(crate) const DANGLING_REFERENCE: &str = "Tema ou usuário referenciado não existe!";
