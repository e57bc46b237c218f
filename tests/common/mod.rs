//! Shared fixtures: an in-memory application state and request helpers.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use blogpessoal::model::{EntityRef, PostInput, Theme, ThemeInput, User, UserInput};
use blogpessoal::{build_app, AppConfig, AppState, MemoryStore};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

pub const PASSWORD: &str = "rootroot";

pub fn test_config() -> AppConfig {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("JWT_SECRET", "integration-test-secret"),
        ("BCRYPT_COST", "4"),
        ("TZ_OFFSET", "-03:00"),
    ]);
    AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).expect("test config")
}

pub fn test_state() -> AppState {
    AppState::new(test_config(), Arc::new(MemoryStore::new()))
}

pub fn test_app() -> (AppState, Router) {
    let state = test_state();
    let app = build_app(state.clone());
    (state, app)
}

pub fn theme_input(descricao: &str) -> ThemeInput {
    ThemeInput {
        id: None,
        descricao: descricao.to_string(),
    }
}

pub fn user_input(usuario: &str) -> UserInput {
    UserInput {
        id: None,
        nome: "Root".into(),
        usuario: usuario.into(),
        senha: PASSWORD.into(),
        foto: None,
    }
}

pub fn post_input(titulo: &str, tema_id: i64) -> PostInput {
    PostInput {
        id: None,
        titulo: titulo.into(),
        texto: "Lorem ipsum".into(),
        tema: EntityRef { id: tema_id },
        usuario: None,
    }
}

pub async fn seed_theme(state: &AppState, descricao: &str) -> Theme {
    state.themes.create(theme_input(descricao)).await.expect("seed theme")
}

pub async fn seed_user(state: &AppState, usuario: &str) -> User {
    state.users.create(user_input(usuario)).await.expect("seed user")
}

/// Register a user through the service and return an `Authorization` header value.
pub async fn bearer(state: &AppState) -> String {
    seed_user(state, "root@root.com").await;
    state
        .auth
        .authenticate("root@root.com", PASSWORD)
        .await
        .expect("login")
        .token
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, t);
    }
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => req.body(Body::empty()),
    }
    .expect("request");

    let resp = app.clone().oneshot(req).await.expect("response");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
