use super::require_id;
use crate::auth::Bcrypt;
use crate::error::AppError;
use crate::model::{DeleteResult, User, UserInput, UserWrite};
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
    hasher: Bcrypt,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, hasher: Bcrypt) -> Self {
        UserService { store, hasher }
    }

    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.store.all_users().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<User, AppError> {
        self.store
            .user_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado!".into()))
    }

    pub async fn find_by_login(&self, usuario: &str) -> Result<Option<User>, AppError> {
        self.store.user_by_login(usuario).await
    }

    pub async fn create(&self, input: UserInput) -> Result<User, AppError> {
        if self.find_by_login(&input.usuario).await?.is_some() {
            return Err(AppError::Conflict("Usuário já existe!".into()));
        }
        let write = self.hashed(None, input).await?;
        let user = self.store.save_user(write).await?;
        tracing::info!(id = user.id, "user registered");
        Ok(user)
    }

    pub async fn update(&self, input: UserInput) -> Result<User, AppError> {
        let id = require_id(input.id)?;
        self.find_by_id(id).await?;
        if let Some(other) = self.find_by_login(&input.usuario).await? {
            if other.id != id {
                return Err(AppError::Conflict("Usuário (e-mail) já cadastrado!".into()));
            }
        }
        let write = self.hashed(Some(id), input).await?;
        self.store.save_user(write).await
    }

    pub async fn delete(&self, id: i64) -> Result<DeleteResult, AppError> {
        self.find_by_id(id).await?;
        let affected = self.store.delete_user(id).await?;
        Ok(DeleteResult { affected })
    }

    async fn hashed(&self, id: Option<i64>, input: UserInput) -> Result<UserWrite, AppError> {
        Ok(UserWrite {
            id,
            senha_hash: self.hasher.hash(&input.senha).await?,
            nome: input.nome,
            usuario: input.usuario,
            foto: input.foto,
        })
    }
}
