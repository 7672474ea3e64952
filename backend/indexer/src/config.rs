//! Runtime configuration, read from the environment once at startup.
//!
//! `CONTRACT_ID` is the only required variable; everything else has a
//! testnet-friendly default. A `.env` file is honoured when present
//! (loaded in `main` before this runs).

use std::str::FromStr;
use std::time::Duration;

use crate::errors::{IndexerError, Result};

/// Settings consumed by the RPC poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Soroban RPC endpoint (`RPC_URL`).
    pub rpc_url: String,
    /// Survey escrow contract address in Strkey format (`CONTRACT_ID`).
    pub contract_id: String,
    /// Delay between poll iterations (`POLL_INTERVAL_SECS`).
    pub poll_interval: Duration,
    /// Maximum events per `getEvents` page (`EVENTS_PER_PAGE`).
    pub events_per_page: u32,
    /// First ledger to scan when no cursor has been persisted (`START_LEDGER`).
    pub start_ledger: u32,
}

/// Full indexer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub poller: PollerConfig,
    /// SQLite database file or URL (`DATABASE_URL`).
    pub database_url: String,
    /// Listen port for the REST API (`API_PORT`).
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let contract_id = std::env::var("CONTRACT_ID").map_err(|_| {
            IndexerError::Config("CONTRACT_ID environment variable is required".into())
        })?;

        Ok(Config {
            poller: PollerConfig {
                rpc_url: text("RPC_URL", "https://soroban-testnet.stellar.org"),
                contract_id,
                poll_interval: Duration::from_secs(parsed("POLL_INTERVAL_SECS", 5u64)?),
                events_per_page: parsed("EVENTS_PER_PAGE", 100)?,
                start_ledger: parsed("START_LEDGER", 0)?,
            },
            database_url: text("DATABASE_URL", "sqlite:./survey_events.db"),
            api_port: parsed("API_PORT", 3001u16)?,
        })
    }
}

/// String variable with a default.
fn text(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parseable variable with a default. An unset variable falls back; a set
/// but unparseable one is a configuration error, not a silent default.
fn parsed<T: FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|_| IndexerError::Config(format!("invalid value for {key}: {raw}"))),
    }
}
