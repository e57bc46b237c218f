//! Router assembly: public and protected route groups plus CORS, tracing and body-limit layers.

use crate::middleware::require_auth;
use crate::routes::{common_routes, post_routes, theme_routes, user_public_routes, user_routes};
use crate::state::AppState;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware, Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router for `state`.
pub fn build_app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(post_routes())
        .merge(theme_routes())
        .merge(user_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new().merge(common_routes()).merge(user_public_routes());

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors_layer(&state.config.cors_origin))
        .layer(RequestBodyLimitLayer::new(state.config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Exactly one allowed origin; GET/POST/PUT/DELETE; Content-Type and Authorization headers.
fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = match HeaderValue::from_str(origin) {
        Ok(v) => AllowOrigin::exact(v),
        Err(_) => {
            tracing::warn!(origin, "CORS_ORIGIN is not a valid header value; cross-origin requests disabled");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
