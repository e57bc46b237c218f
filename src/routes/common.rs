//! Common routes: root redirect, route table, health, readiness, version.

use super::{RouteDoc, ROUTES};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Redirect, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct DocsBody {
    name: &'static str,
    version: &'static str,
    routes: &'static [RouteDoc],
}

async fn root() -> Redirect {
    Redirect::permanent("/swagger")
}

async fn docs() -> Json<DocsBody> {
    Json(DocsBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        routes: ROUTES,
    })
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.store.ping().await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /, /swagger, /health, /ready, /version.
pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/swagger", get(docs))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
}
