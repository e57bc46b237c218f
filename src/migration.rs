//! Schema bootstrap: create the blog tables if they do not exist.
//! Order follows foreign-key dependencies (themes and users before posts).

use crate::error::AppError;
use sqlx::PgPool;

const DDL: &[(&str, &str)] = &[
    (
        "tb_temas",
        r#"
        CREATE TABLE IF NOT EXISTS tb_temas (
            id BIGSERIAL PRIMARY KEY,
            descricao VARCHAR(255) NOT NULL
        )
        "#,
    ),
    (
        "tb_usuarios",
        r#"
        CREATE TABLE IF NOT EXISTS tb_usuarios (
            id BIGSERIAL PRIMARY KEY,
            nome VARCHAR(255) NOT NULL,
            usuario VARCHAR(255) NOT NULL UNIQUE,
            senha VARCHAR(255) NOT NULL,
            foto VARCHAR(5000)
        )
        "#,
    ),
    (
        "tb_postagens",
        r#"
        CREATE TABLE IF NOT EXISTS tb_postagens (
            id BIGSERIAL PRIMARY KEY,
            titulo VARCHAR(100) NOT NULL,
            texto VARCHAR(1000) NOT NULL,
            data TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            tema_id BIGINT NOT NULL REFERENCES tb_temas (id) ON DELETE RESTRICT,
            usuario_id BIGINT REFERENCES tb_usuarios (id) ON DELETE RESTRICT
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_tb_postagens_tema_id ON tb_postagens (tema_id)",
    "CREATE INDEX IF NOT EXISTS idx_tb_postagens_usuario_id ON tb_postagens (usuario_id)",
];

/// Idempotent: every statement uses IF NOT EXISTS.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for (table, ddl) in DDL {
        tracing::debug!(table, "ensure table");
        sqlx::query(ddl).execute(pool).await?;
    }
    for sql in INDEXES {
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names() -> Vec<&'static str> {
        DDL.iter().map(|(t, _)| *t).collect()
    }

    #[test]
    fn creates_referenced_tables_first() {
        assert_eq!(table_names(), vec!["tb_temas", "tb_usuarios", "tb_postagens"]);
    }

    #[test]
    fn posts_restrict_delete_of_referenced_rows() {
        let (_, posts) = DDL[2];
        assert!(posts.contains("REFERENCES tb_temas (id) ON DELETE RESTRICT"));
        assert!(posts.contains("REFERENCES tb_usuarios (id) ON DELETE RESTRICT"));
        let (_, users) = DDL[1];
        assert!(users.contains("usuario VARCHAR(255) NOT NULL UNIQUE"));
    }
}
