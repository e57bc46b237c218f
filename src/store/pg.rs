//! PostgreSQL repositories over `sqlx::PgPool`. Tables are created by `migration::apply_migrations`.

use super::{
    referenced_ids, PostRepository, PostRow, Store, ThemeRepository, UserRepository, DANGLING_REFERENCE,
    LOGIN_TAKEN, THEME_IN_USE, USER_IN_USE,
};
use crate::error::AppError;
use crate::model::{Post, PostWrite, Relations, Theme, User, UserWrite};
use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::PgPool;
use std::collections::HashMap;

const THEME_COLUMNS: &str = "id, descricao";
const USER_COLUMNS: &str = "id, nome, usuario, senha, foto";
const POST_COLUMNS: &str = "id, titulo, texto, data, tema_id, usuario_id";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn themes_in(&self, ids: &[i64]) -> Result<HashMap<i64, Theme>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!("SELECT {} FROM tb_temas WHERE id = ANY($1)", THEME_COLUMNS);
        tracing::debug!(sql = %sql, ids = ?ids, "query");
        let rows: Vec<Theme> = sqlx::query_as(&sql).bind(ids).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|t| (t.id, t)).collect())
    }

    async fn users_in(&self, ids: &[i64]) -> Result<HashMap<i64, User>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!("SELECT {} FROM tb_usuarios WHERE id = ANY($1)", USER_COLUMNS);
        tracing::debug!(sql = %sql, ids = ?ids, "query");
        let rows: Vec<User> = sqlx::query_as(&sql).bind(ids).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|u| (u.id, u)).collect())
    }

    /// Batch-load the requested relations for `rows` (one query per relation) and assemble posts.
    async fn with_relations(&self, rows: Vec<PostRow>, load: Relations) -> Result<Vec<Post>, AppError> {
        let (tema_ids, usuario_ids) = referenced_ids(&rows);
        let themes = if load.tema { self.themes_in(&tema_ids).await? } else { HashMap::new() };
        let users = if load.usuario { self.users_in(&usuario_ids).await? } else { HashMap::new() };
        Ok(rows
            .into_iter()
            .map(|r| r.into_post(&themes, &users, load))
            .collect())
    }

    async fn with_relations_one(&self, row: PostRow, load: Relations) -> Result<Post, AppError> {
        let mut posts = self.with_relations(vec![row], load).await?;
        posts
            .pop()
            .ok_or_else(|| AppError::Db(sqlx::Error::RowNotFound))
    }
}

/// `%needle%` for ILIKE with the pattern metacharacters of `needle` escaped.
fn contains_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// Turn constraint violations into `Conflict`; everything else stays a database error.
fn map_constraint(e: sqlx::Error, unique: &str, foreign_key: &str) -> AppError {
    if let Some(db) = e.as_database_error() {
        match db.kind() {
            ErrorKind::UniqueViolation => return AppError::Conflict(unique.to_string()),
            ErrorKind::ForeignKeyViolation => return AppError::Conflict(foreign_key.to_string()),
            _ => {}
        }
    }
    AppError::Db(e)
}

#[async_trait]
impl ThemeRepository for PgStore {
    async fn all_themes(&self) -> Result<Vec<Theme>, AppError> {
        let sql = format!("SELECT {} FROM tb_temas ORDER BY id", THEME_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(&sql).fetch_all(&self.pool).await?)
    }

    async fn theme_by_id(&self, id: i64) -> Result<Option<Theme>, AppError> {
        let sql = format!("SELECT {} FROM tb_temas WHERE id = $1", THEME_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn themes_by_descricao(&self, needle: &str) -> Result<Vec<Theme>, AppError> {
        let sql = format!(
            r"SELECT {} FROM tb_temas WHERE descricao ILIKE $1 ESCAPE '\' ORDER BY id",
            THEME_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(&sql)
            .bind(contains_pattern(needle))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn save_theme(&self, id: Option<i64>, descricao: &str) -> Result<Theme, AppError> {
        match id {
            None => {
                let sql = format!("INSERT INTO tb_temas (descricao) VALUES ($1) RETURNING {}", THEME_COLUMNS);
                tracing::debug!(sql = %sql, "query");
                Ok(sqlx::query_as(&sql).bind(descricao).fetch_one(&self.pool).await?)
            }
            Some(id) => {
                let sql = format!(
                    "UPDATE tb_temas SET descricao = $1 WHERE id = $2 RETURNING {}",
                    THEME_COLUMNS
                );
                tracing::debug!(sql = %sql, id, "query");
                sqlx::query_as(&sql)
                    .bind(descricao)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Tema não encontrado!".into()))
            }
        }
    }

    async fn delete_theme(&self, id: i64) -> Result<u64, AppError> {
        let sql = "DELETE FROM tb_temas WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let res = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_constraint(e, THEME_IN_USE, THEME_IN_USE))?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn all_users(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM tb_usuarios ORDER BY id", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(&sql).fetch_all(&self.pool).await?)
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM tb_usuarios WHERE id = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn user_by_login(&self, usuario: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM tb_usuarios WHERE usuario = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(&sql).bind(usuario).fetch_optional(&self.pool).await?)
    }

    async fn save_user(&self, user: UserWrite) -> Result<User, AppError> {
        let row: Result<Option<User>, sqlx::Error> = match user.id {
            None => {
                let sql = format!(
                    "INSERT INTO tb_usuarios (nome, usuario, senha, foto) VALUES ($1, $2, $3, $4) RETURNING {}",
                    USER_COLUMNS
                );
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as(&sql)
                    .bind(&user.nome)
                    .bind(&user.usuario)
                    .bind(&user.senha_hash)
                    .bind(&user.foto)
                    .fetch_optional(&self.pool)
                    .await
            }
            Some(id) => {
                let sql = format!(
                    "UPDATE tb_usuarios SET nome = $1, usuario = $2, senha = $3, foto = $4 WHERE id = $5 RETURNING {}",
                    USER_COLUMNS
                );
                tracing::debug!(sql = %sql, id, "query");
                sqlx::query_as(&sql)
                    .bind(&user.nome)
                    .bind(&user.usuario)
                    .bind(&user.senha_hash)
                    .bind(&user.foto)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
            }
        };
        row.map_err(|e| map_constraint(e, LOGIN_TAKEN, USER_IN_USE))?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado!".into()))
    }

    async fn delete_user(&self, id: i64) -> Result<u64, AppError> {
        let sql = "DELETE FROM tb_usuarios WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let res = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_constraint(e, USER_IN_USE, USER_IN_USE))?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl PostRepository for PgStore {
    async fn all_posts(&self, load: Relations) -> Result<Vec<Post>, AppError> {
        let sql = format!("SELECT {} FROM tb_postagens ORDER BY id", POST_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<PostRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        self.with_relations(rows, load).await
    }

    async fn post_by_id(&self, id: i64, load: Relations) -> Result<Option<Post>, AppError> {
        let sql = format!("SELECT {} FROM tb_postagens WHERE id = $1", POST_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<PostRow> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        match row {
            Some(r) => Ok(Some(self.with_relations_one(r, load).await?)),
            None => Ok(None),
        }
    }

    async fn posts_by_titulo(&self, needle: &str, load: Relations) -> Result<Vec<Post>, AppError> {
        let sql = format!(
            r"SELECT {} FROM tb_postagens WHERE titulo ILIKE $1 ESCAPE '\' ORDER BY id",
            POST_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<PostRow> = sqlx::query_as(&sql)
            .bind(contains_pattern(needle))
            .fetch_all(&self.pool)
            .await?;
        self.with_relations(rows, load).await
    }

    async fn save_post(&self, post: PostWrite, load: Relations) -> Result<Post, AppError> {
        let row: Result<Option<PostRow>, sqlx::Error> = match post.id {
            None => {
                let sql = format!(
                    "INSERT INTO tb_postagens (titulo, texto, data, tema_id, usuario_id) \
                     VALUES ($1, $2, NOW(), $3, $4) RETURNING {}",
                    POST_COLUMNS
                );
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as(&sql)
                    .bind(&post.titulo)
                    .bind(&post.texto)
                    .bind(post.tema_id)
                    .bind(post.usuario_id)
                    .fetch_optional(&self.pool)
                    .await
            }
            Some(id) => {
                let sql = format!(
                    "UPDATE tb_postagens SET titulo = $1, texto = $2, data = NOW(), tema_id = $3, usuario_id = $4 \
                     WHERE id = $5 RETURNING {}",
                    POST_COLUMNS
                );
                tracing::debug!(sql = %sql, id, "query");
                sqlx::query_as(&sql)
                    .bind(&post.titulo)
                    .bind(&post.texto)
                    .bind(post.tema_id)
                    .bind(post.usuario_id)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
            }
        };
        let row = row
            .map_err(|e| map_constraint(e, DANGLING_REFERENCE, DANGLING_REFERENCE))?
            .ok_or_else(|| AppError::NotFound("Postagem não encontrada!".into()))?;
        self.with_relations_one(row, load).await
    }

    async fn delete_post(&self, id: i64) -> Result<u64, AppError> {
        let sql = "DELETE FROM tb_postagens WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let res = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(contains_pattern("abc"), "%abc%");
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
