use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use jobtrack_api::app::app;
use jobtrack_api::config::AppConfig;
use jobtrack_api::state::AppState;
use jobtrack_api::store::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and
    // ACCESS_TOKEN_SECRET without exporting them.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    tracing::info!(environment = ?config.environment, "starting jobtrack-api");

    let store = PgStore::connect(&config.database)
        .await
        .context("connecting to database")?;
    store.run_migrations().await.context("running migrations")?;

    let state = AppState::new(&config.security, Arc::new(store));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
