use crate::handlers::theme::{create, delete, list, list_by_descricao, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn theme_routes() -> Router<AppState> {
    Router::new()
        .route("/temas", get(list).post(create).put(update))
        .route("/temas/descricao/:descricao", get(list_by_descricao))
        .route("/temas/:id", get(read).delete(delete))
}
