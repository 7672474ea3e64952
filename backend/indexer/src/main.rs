//! Survey escrow event indexer — entry point.
//!
//! Starts a background poller that tails the survey escrow contract's events
//! via Soroban `getEvents` and persists them to SQLite, alongside a small
//! Axum REST API serving the indexed data.

mod api;
mod config;
mod db;
mod errors;
mod events;
mod indexer;
mod rpc;

use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use indexer::Poller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Optional .env file, ignored if missing.
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    let pool = db::init_pool(&config.database_url).await?;

    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;
    tokio::spawn(Poller::new(pool.clone(), config.poller, client).run());

    let app = api::router(pool);
    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
