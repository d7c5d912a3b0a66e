use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use tollgate::router::init_router;
use tollgate::state::{AppConfig, AppState};
use tollgate_db::{PgStore, init_db_pool};
use tollgate_observability::{init_metrics, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let config = AppConfig::from_env().context("invalid configuration")?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    let store = Arc::new(PgStore::new(pool));

    let state = AppState::new(&config, store)?.with_metrics(init_metrics()?);
    let app = init_router(state);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Server running on http://{addr}");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    axum::serve(listener, app).await?;

    Ok(())
}
