use crate::handlers::user::{delete, list, login, read, register, update};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

/// Routes that require a token.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/usuarios/all", get(list))
        .route("/usuarios/atualizar", put(update))
        .route("/usuarios/:id", get(read).delete(delete))
}

/// Registration and login.
pub fn user_public_routes() -> Router<AppState> {
    Router::new()
        .route("/usuarios/cadastrar", post(register))
        .route("/usuarios/logar", post(login))
}
