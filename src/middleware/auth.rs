use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Caller identity attached to the request by [`require_auth`].
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub login: String,
}

/// Require `Authorization: Bearer <jwt>`; 401 when missing, malformed, expired or badly signed.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("token ausente".into()))?;
    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("token mal formatado".into()))?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("token mal formatado".into()))?;

    let claims = state.auth.verify_token(token)?;
    tracing::debug!(user = %claims.sub, "authenticated request");
    req.extensions_mut().insert(AuthUser { login: claims.sub });

    Ok(next.run(req).await)
}
