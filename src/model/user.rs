use serde::{Deserialize, Serialize};

/// Row of `tb_usuarios`. `senha` holds the bcrypt digest and is never serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub usuario: String,
    #[serde(skip_serializing, default)]
    pub senha: String,
    pub foto: Option<String>,
}

/// Body of `POST /usuarios/cadastrar` and `PUT /usuarios/atualizar`; `senha` is plaintext here.
#[derive(Clone, Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub nome: String,
    pub usuario: String,
    pub senha: String,
    #[serde(default)]
    pub foto: Option<String>,
}

impl std::fmt::Debug for UserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInput")
            .field("id", &self.id)
            .field("nome", &self.nome)
            .field("usuario", &self.usuario)
            .field("senha", &"***")
            .field("foto", &self.foto)
            .finish()
    }
}

/// What the user repository persists: the password is already hashed.
#[derive(Clone, Debug)]
pub struct UserWrite {
    pub id: Option<i64>,
    pub nome: String,
    pub usuario: String,
    pub senha_hash: String,
    pub foto: Option<String>,
}

/// Body of `POST /usuarios/logar`.
#[derive(Clone, Deserialize)]
pub struct LoginInput {
    pub usuario: String,
    pub senha: String,
}

/// Successful login: the user's public fields plus `token` as `"Bearer <jwt>"`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: i64,
    pub nome: String,
    pub usuario: String,
    pub foto: Option<String>,
    pub token: String,
}
