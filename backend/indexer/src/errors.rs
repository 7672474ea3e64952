//! Error handling for the indexer binary.
//!
//! One enum covers the three failure domains: the SQLite store, the Soroban
//! RPC, and startup configuration. Every error is fatal only for the current
//! operation — the poll loop logs it and tries again on its next tick, and
//! API handlers turn it into a 500.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Debug, Error)]
pub enum IndexerError {
    /// Query or connection failure against the SQLite store.
    #[error("store: {0}")]
    Store(#[from] sqlx::Error),

    /// Schema migration failure at startup.
    #[error("migration: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Transport-level RPC failure surfaced after the retry loop gives up.
    #[error("rpc transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// The RPC answered with a non-retryable JSON-RPC error.
    #[error("rpc rejected the request (code {code}): {message}")]
    Rejected { code: i64, message: String },

    /// The RPC response did not have the shape we expect.
    #[error("malformed rpc response: {0}")]
    Malformed(String),

    /// Missing or unparseable environment variable.
    #[error("config: {0}")]
    Config(String),
}
