use super::UserService;
use crate::auth::{Bcrypt, Claims, TokenIssuer};
use crate::error::AppError;
use crate::model::LoginResponse;
use std::sync::Arc;

const INVALID_CREDENTIALS: &str = "Usuário e/ou senha inválidos!";

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    hasher: Bcrypt,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(users: UserService, hasher: Bcrypt, tokens: Arc<TokenIssuer>) -> Self {
        AuthService { users, hasher, tokens }
    }

    /// Check login and password; on success issue a token for the login.
    pub async fn authenticate(&self, usuario: &str, senha: &str) -> Result<LoginResponse, AppError> {
        let user = match self.users.find_by_login(usuario).await? {
            Some(u) if self.hasher.verify(senha, &u.senha).await? => u,
            _ => {
                tracing::info!("login rejected");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
            }
        };
        let token = self.tokens.issue(&user.usuario)?;
        tracing::info!(id = user.id, "login accepted");
        Ok(LoginResponse {
            id: user.id,
            nome: user.nome,
            usuario: user.usuario,
            foto: user.foto,
            token: format!("Bearer {}", token),
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        self.tokens.verify(token)
    }
}
