//! `/usuarios` handlers, including registration and login.

use super::{parse_id, JsonBody};
use crate::error::AppError;
use crate::model::{LoginInput, UserInput};
use crate::response::{success_created, success_many, success_ok};
use crate::service::{RequestValidator, LOGIN_RULES, USER_RULES};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(success_many(state.users.find_all().await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    Ok(success_ok(state.users.find_by_id(id).await?))
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: UserInput = RequestValidator::parse(body, USER_RULES)?;
    Ok(success_created(state.users.create(input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: UserInput = RequestValidator::parse(body, USER_RULES)?;
    Ok(success_ok(state.users.update(input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: LoginInput = RequestValidator::parse(body, LOGIN_RULES)?;
    Ok(success_ok(state.auth.authenticate(&input.usuario, &input.senha).await?))
}
