use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use flashcard_srs::{
    AppState,
    anki_connect::AnkiConnectClient,
    app,
    clock::SystemClock,
    config::Settings,
    data::db::{build_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env();

    // Database configuration
    let pool = build_pool(&settings.database_url).context("Failed to create DB pool")?;
    {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        run_migrations(&mut conn).context("Failed to prepare database schema")?;
    }

    let anki = AnkiConnectClient::new(settings.anki_connect_url.clone())
        .context("Failed to build AnkiConnect client")?;

    let listener = TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", settings.bind_addr))?;
    log::info!("Server running on http://{}", settings.bind_addr);

    let state = AppState {
        pool,
        clock: Arc::new(SystemClock),
        anki,
        settings: Arc::new(settings),
    };

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;
    Ok(())
}
