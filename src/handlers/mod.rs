//! HTTP handlers: one module per entity, each a thin shim over its service.

pub mod post;
pub mod theme;
pub mod user;

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

/// JSON request body whose rejections are reported as [`AppError`].
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

/// Path ids are positive integers.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    match id_str.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::BadRequest("invalid id".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn parses_positive_ids_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("0").is_err());
        assert!(parse_id("-1").is_err());
        assert!(parse_id("abc").is_err());
    }
}
