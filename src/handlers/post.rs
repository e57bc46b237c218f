//! `/postagens` handlers.

use super::{parse_id, JsonBody};
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::model::PostInput;
use crate::response::{success_created, success_many, success_ok};
use crate::service::{RequestValidator, POST_RULES};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(success_many(state.posts.find_all().await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    Ok(success_ok(state.posts.find_by_id(id).await?))
}

pub async fn list_by_titulo(
    State(state): State<AppState>,
    Path(titulo): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(success_many(state.posts.find_all_by_titulo(&titulo).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: PostInput = RequestValidator::parse(body, POST_RULES)?;
    let post = state.posts.create(input).await?;
    tracing::info!(id = post.id, by = %user.login, "post created");
    Ok(success_created(post))
}

pub async fn update(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: PostInput = RequestValidator::parse(body, POST_RULES)?;
    Ok(success_ok(state.posts.update(input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.posts.delete(id).await?;
    tracing::info!(id, by = %user.login, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}
