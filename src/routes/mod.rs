//! Route table. Entity routes are split into public (registration, login) and protected groups;
//! `app::build_app` puts the auth middleware on the protected group.

mod common;
mod post;
mod theme;
mod user;

pub use common::common_routes;
pub use post::post_routes;
pub use theme::theme_routes;
pub use user::{user_public_routes, user_routes};

use serde::Serialize;

/// One published endpoint, served at `/swagger`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RouteDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub auth: bool,
    pub summary: &'static str,
}

const fn doc(method: &'static str, path: &'static str, auth: bool, summary: &'static str) -> RouteDoc {
    RouteDoc {
        method,
        path,
        auth,
        summary,
    }
}

pub const ROUTES: &[RouteDoc] = &[
    doc("GET", "/postagens", true, "all posts with tema and usuario"),
    doc("GET", "/postagens/:id", true, "post by id"),
    doc("GET", "/postagens/titulo/:titulo", true, "posts whose titulo contains the text (case-insensitive)"),
    doc("POST", "/postagens", true, "create post; tema.id must exist"),
    doc("PUT", "/postagens", true, "update post by body id; tema.id must exist"),
    doc("DELETE", "/postagens/:id", true, "delete post"),
    doc("GET", "/temas", true, "all themes"),
    doc("GET", "/temas/:id", true, "theme by id"),
    doc("GET", "/temas/descricao/:descricao", true, "themes whose descricao contains the text"),
    doc("POST", "/temas", true, "create theme"),
    doc("PUT", "/temas", true, "update theme by body id"),
    doc("DELETE", "/temas/:id", true, "delete theme; 409 while posts reference it"),
    doc("GET", "/usuarios/all", true, "all users"),
    doc("GET", "/usuarios/:id", true, "user by id"),
    doc("POST", "/usuarios/cadastrar", false, "register user; 409 if login is taken"),
    doc("PUT", "/usuarios/atualizar", true, "update user by body id"),
    doc("DELETE", "/usuarios/:id", true, "delete user; 409 while posts reference it"),
    doc("POST", "/usuarios/logar", false, "login; returns a bearer token"),
    doc("GET", "/health", false, "liveness"),
    doc("GET", "/ready", false, "readiness (storage reachable)"),
    doc("GET", "/version", false, "package name and version"),
];
