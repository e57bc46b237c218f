//! blogpessoal server: loads configuration from the environment (and `.env`), opens the
//! PostgreSQL pool when `DATABASE_URL` is set, creates the tables and serves the API.
//!
//! Run from repo root: `cargo run -p blogpessoal-server`

use blogpessoal::{apply_migrations, build_app, AppConfig, AppState, MemoryStore, PgStore, Store};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blogpessoal=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await?;
            apply_migrations(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store (data is lost on exit)");
            Arc::new(MemoryStore::new())
        }
    };

    let addr = config.bind_addr();
    let state = AppState::new(config, store);
    let app = build_app(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("blogpessoal listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
