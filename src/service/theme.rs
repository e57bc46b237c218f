use super::require_id;
use crate::error::AppError;
use crate::model::{DeleteResult, Theme, ThemeInput};
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct ThemeService {
    store: Arc<dyn Store>,
}

impl ThemeService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        ThemeService { store }
    }

    pub async fn find_all(&self) -> Result<Vec<Theme>, AppError> {
        self.store.all_themes().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Theme, AppError> {
        self.store
            .theme_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tema não encontrado!".into()))
    }

    pub async fn find_all_by_descricao(&self, descricao: &str) -> Result<Vec<Theme>, AppError> {
        self.store.themes_by_descricao(descricao).await
    }

    pub async fn create(&self, input: ThemeInput) -> Result<Theme, AppError> {
        self.store.save_theme(None, &input.descricao).await
    }

    pub async fn update(&self, input: ThemeInput) -> Result<Theme, AppError> {
        let id = require_id(input.id)?;
        self.find_by_id(id).await?;
        self.store.save_theme(Some(id), &input.descricao).await
    }

    pub async fn delete(&self, id: i64) -> Result<DeleteResult, AppError> {
        self.find_by_id(id).await?;
        let affected = self.store.delete_theme(id).await?;
        Ok(DeleteResult { affected })
    }
}
