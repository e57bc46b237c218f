use crate::handlers::post::{create, delete, list, list_by_titulo, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/postagens", get(list).post(create).put(update))
        .route("/postagens/titulo/:titulo", get(list_by_titulo))
        .route("/postagens/:id", get(read).delete(delete))
}
