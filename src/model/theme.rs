use serde::{Deserialize, Serialize};

/// Row of `tb_temas`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Theme {
    pub id: i64,
    pub descricao: String,
}

/// Body of `POST /temas` and `PUT /temas`. `id` is present only on update.
#[derive(Clone, Debug, Deserialize)]
pub struct ThemeInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub descricao: String,
}
