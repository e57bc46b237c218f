//! In-process store. Used when no database is configured and by the test suite.

use super::{
    PostRepository, PostRow, Store, ThemeRepository, UserRepository, DANGLING_REFERENCE, LOGIN_TAKEN,
    THEME_IN_USE, USER_IN_USE,
};
use crate::error::AppError;
use crate::model::{Post, PostWrite, Relations, Theme, User, UserWrite};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    themes: BTreeMap<i64, Theme>,
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, PostRow>,
    last_theme_id: i64,
    last_user_id: i64,
    last_post_id: i64,
}

impl Tables {
    fn assemble(&self, row: &PostRow, load: Relations) -> Post {
        let themes: HashMap<i64, Theme> = self
            .themes
            .get(&row.tema_id)
            .filter(|_| load.tema)
            .map(|t| (t.id, t.clone()))
            .into_iter()
            .collect();
        let users: HashMap<i64, User> = row
            .usuario_id
            .and_then(|id| self.users.get(&id))
            .filter(|_| load.usuario)
            .map(|u| (u.id, u.clone()))
            .into_iter()
            .collect();
        row.clone().into_post(&themes, &users, load)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThemeRepository for MemoryStore {
    async fn all_themes(&self) -> Result<Vec<Theme>, AppError> {
        Ok(self.tables.read().await.themes.values().cloned().collect())
    }

    async fn theme_by_id(&self, id: i64) -> Result<Option<Theme>, AppError> {
        Ok(self.tables.read().await.themes.get(&id).cloned())
    }

    async fn themes_by_descricao(&self, needle: &str) -> Result<Vec<Theme>, AppError> {
        let t = self.tables.read().await;
        Ok(t.themes
            .values()
            .filter(|theme| contains_ci(&theme.descricao, needle))
            .cloned()
            .collect())
    }

    async fn save_theme(&self, id: Option<i64>, descricao: &str) -> Result<Theme, AppError> {
        let mut t = self.tables.write().await;
        let id = match id {
            Some(id) if t.themes.contains_key(&id) => id,
            Some(_) => return Err(AppError::NotFound("Tema não encontrado!".into())),
            None => {
                t.last_theme_id += 1;
                t.last_theme_id
            }
        };
        let theme = Theme {
            id,
            descricao: descricao.to_string(),
        };
        t.themes.insert(id, theme.clone());
        Ok(theme)
    }

    async fn delete_theme(&self, id: i64) -> Result<u64, AppError> {
        let mut t = self.tables.write().await;
        if t.posts.values().any(|p| p.tema_id == id) {
            return Err(AppError::Conflict(THEME_IN_USE.into()));
        }
        Ok(t.themes.remove(&id).map_or(0, |_| 1))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn all_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_login(&self, usuario: &str) -> Result<Option<User>, AppError> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.usuario == usuario).cloned())
    }

    async fn save_user(&self, user: UserWrite) -> Result<User, AppError> {
        let mut t = self.tables.write().await;
        let taken = t
            .users
            .values()
            .any(|u| u.usuario == user.usuario && Some(u.id) != user.id);
        if taken {
            return Err(AppError::Conflict(LOGIN_TAKEN.into()));
        }
        let id = match user.id {
            Some(id) if t.users.contains_key(&id) => id,
            Some(_) => return Err(AppError::NotFound("Usuário não encontrado!".into())),
            None => {
                t.last_user_id += 1;
                t.last_user_id
            }
        };
        let stored = User {
            id,
            nome: user.nome,
            usuario: user.usuario,
            senha: user.senha_hash,
            foto: user.foto,
        };
        t.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_user(&self, id: i64) -> Result<u64, AppError> {
        let mut t = self.tables.write().await;
        if t.posts.values().any(|p| p.usuario_id == Some(id)) {
            return Err(AppError::Conflict(USER_IN_USE.into()));
        }
        Ok(t.users.remove(&id).map_or(0, |_| 1))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn all_posts(&self, load: Relations) -> Result<Vec<Post>, AppError> {
        let t = self.tables.read().await;
        Ok(t.posts.values().map(|row| t.assemble(row, load)).collect())
    }

    async fn post_by_id(&self, id: i64, load: Relations) -> Result<Option<Post>, AppError> {
        let t = self.tables.read().await;
        Ok(t.posts.get(&id).map(|row| t.assemble(row, load)))
    }

    async fn posts_by_titulo(&self, needle: &str, load: Relations) -> Result<Vec<Post>, AppError> {
        let t = self.tables.read().await;
        Ok(t.posts
            .values()
            .filter(|row| contains_ci(&row.titulo, needle))
            .map(|row| t.assemble(row, load))
            .collect())
    }

    async fn save_post(&self, post: PostWrite, load: Relations) -> Result<Post, AppError> {
        let mut t = self.tables.write().await;
        let dangling = !t.themes.contains_key(&post.tema_id)
            || post.usuario_id.is_some_and(|uid| !t.users.contains_key(&uid));
        if dangling {
            return Err(AppError::Conflict(DANGLING_REFERENCE.into()));
        }
        let id = match post.id {
            Some(id) if t.posts.contains_key(&id) => id,
            Some(_) => return Err(AppError::NotFound("Postagem não encontrada!".into())),
            None => {
                t.last_post_id += 1;
                t.last_post_id
            }
        };
        let row = PostRow {
            id,
            titulo: post.titulo,
            texto: post.texto,
            data: Utc::now(),
            tema_id: post.tema_id,
            usuario_id: post.usuario_id,
        };
        t.posts.insert(id, row.clone());
        Ok(t.assemble(&row, load))
    }

    async fn delete_post(&self, id: i64) -> Result<u64, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.posts.remove(&id).map_or(0, |_| 1))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
