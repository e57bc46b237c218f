//! `/temas` handlers.

use super::{parse_id, JsonBody};
use crate::error::AppError;
use crate::model::ThemeInput;
use crate::response::{success_created, success_many, success_ok};
use crate::service::{RequestValidator, THEME_RULES};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(success_many(state.themes.find_all().await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    Ok(success_ok(state.themes.find_by_id(id).await?))
}

pub async fn list_by_descricao(
    State(state): State<AppState>,
    Path(descricao): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(success_many(state.themes.find_all_by_descricao(&descricao).await?))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: ThemeInput = RequestValidator::parse(body, THEME_RULES)?;
    Ok(success_created(state.themes.create(input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: ThemeInput = RequestValidator::parse(body, THEME_RULES)?;
    Ok(success_ok(state.themes.update(input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.themes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
