use super::{require_id, ThemeService, UserService};
use crate::error::AppError;
use crate::model::{DeleteResult, Post, PostInput, PostWrite, Relations};
use crate::store::Store;
use chrono::FixedOffset;
use std::sync::Arc;

/// Posts always come back with `tema` and `usuario` loaded, timestamps in the configured offset.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
    themes: ThemeService,
    users: UserService,
    offset: FixedOffset,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>, themes: ThemeService, users: UserService, offset: FixedOffset) -> Self {
        PostService {
            store,
            themes,
            users,
            offset,
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        let posts = self.store.all_posts(Relations::ALL).await?;
        Ok(self.localize_all(posts))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Post, AppError> {
        self.store
            .post_by_id(id, Relations::ALL)
            .await?
            .map(|p| p.with_offset(self.offset))
            .ok_or_else(|| AppError::NotFound("Postagem não encontrada!".into()))
    }

    pub async fn find_all_by_titulo(&self, titulo: &str) -> Result<Vec<Post>, AppError> {
        let posts = self.store.posts_by_titulo(titulo, Relations::ALL).await?;
        Ok(self.localize_all(posts))
    }

    pub async fn create(&self, input: PostInput) -> Result<Post, AppError> {
        let mut write = PostWrite::from(input);
        write.id = None;
        self.check_references(&write).await?;
        let post = self.store.save_post(write, Relations::ALL).await?;
        Ok(post.with_offset(self.offset))
    }

    pub async fn update(&self, input: PostInput) -> Result<Post, AppError> {
        let id = require_id(input.id)?;
        let existing = self.find_by_id(id).await?;
        let mut write = PostWrite::from(input);
        // An omitted author keeps the stored one.
        if write.usuario_id.is_none() {
            write.usuario_id = existing.usuario.map(|u| u.id);
        }
        self.check_references(&write).await?;
        let post = self.store.save_post(write, Relations::ALL).await?;
        Ok(post.with_offset(self.offset))
    }

    pub async fn delete(&self, id: i64) -> Result<DeleteResult, AppError> {
        self.find_by_id(id).await?;
        let affected = self.store.delete_post(id).await?;
        Ok(DeleteResult { affected })
    }

    async fn check_references(&self, write: &PostWrite) -> Result<(), AppError> {
        self.themes.find_by_id(write.tema_id).await?;
        if let Some(uid) = write.usuario_id {
            self.users.find_by_id(uid).await?;
        }
        Ok(())
    }

    fn localize_all(&self, posts: Vec<Post>) -> Vec<Post> {
        posts.into_iter().map(|p| p.with_offset(self.offset)).collect()
    }
}
