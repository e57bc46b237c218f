use super::{EntityRef, Theme, User};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Post with its relations. `tema`/`usuario` are `None` when not requested via [`Relations`]
/// (or, for `usuario`, when the post has no author).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub titulo: String,
    pub texto: String,
    pub data: DateTime<FixedOffset>,
    pub tema: Option<Theme>,
    pub usuario: Option<User>,
}

impl Post {
    /// Render `data` in the given offset (same instant).
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.data = self.data.with_timezone(&offset);
        self
    }
}

/// Which relations the post repository loads alongside each row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relations {
    pub tema: bool,
    pub usuario: bool,
}

impl Relations {
    pub const ALL: Relations = Relations { tema: true, usuario: true };
    pub const NONE: Relations = Relations { tema: false, usuario: false };
}

/// Body of `POST /postagens` and `PUT /postagens`.
#[derive(Clone, Debug, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub titulo: String,
    pub texto: String,
    pub tema: EntityRef,
    #[serde(default)]
    pub usuario: Option<EntityRef>,
}

/// What the post repository persists. `id: None` inserts, `Some` updates that row.
#[derive(Clone, Debug)]
pub struct PostWrite {
    pub id: Option<i64>,
    pub titulo: String,
    pub texto: String,
    pub tema_id: i64,
    pub usuario_id: Option<i64>,
}

impl From<PostInput> for PostWrite {
    fn from(input: PostInput) -> Self {
        PostWrite {
            id: input.id,
            titulo: input.titulo,
            texto: input.texto,
            tema_id: input.tema.id,
            usuario_id: input.usuario.map(|u| u.id),
        }
    }
}

/// Outcome of a delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub affected: u64,
}
