//! Background poller that tails the survey escrow contract's event stream.
//!
//! The cursor policy: within one ledger range we follow the RPC's pagination
//! cursor without moving the start ledger; once a page comes back without a
//! continuation cursor we jump the start ledger forward to the latest ledger
//! the RPC reported. The cursor never moves backwards, and every advance is
//! persisted so a restart resumes exactly where the previous run stopped.

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::config::PollerConfig;
use crate::db;
use crate::errors::Result;
use crate::rpc;

/// Resume position of the poller, persisted in the `indexer_cursor` table.
struct Cursor {
    /// Start ledger for the next `getEvents` call.
    ledger: u32,
    /// RPC pagination token; `Some` while we are mid-way through a ledger range.
    page: Option<String>,
}

impl Cursor {
    /// Load the persisted cursor, falling back to `start_ledger` on a fresh
    /// database.
    async fn load(pool: &SqlitePool, start_ledger: u32) -> Self {
        let ledger = match db::get_last_ledger(pool).await {
            Ok(l) if l > 0 => clamp_ledger(l as u64),
            _ => start_ledger,
        };
        let page = db::get_cursor_string(pool).await.unwrap_or(None);
        Cursor { ledger, page }
    }

    /// Move past a processed page and persist the new position.
    async fn advance(
        &mut self,
        pool: &SqlitePool,
        latest_ledger: Option<u64>,
        next_page: Option<String>,
    ) -> Result<()> {
        if next_page.is_none() {
            if let Some(latest) = latest_ledger {
                self.ledger = clamp_ledger(latest).max(self.ledger);
            }
        }
        self.page = next_page;
        db::save_cursor(pool, self.ledger as i64, self.page.as_deref()).await
    }
}

/// Saturating conversion for ledger sequence numbers coming off the wire as
/// `u64`. Real ledgers fit in `u32`; a larger value means a broken RPC, and
/// pinning to `u32::MAX` beats silently wrapping the cursor back to zero.
fn clamp_ledger(l: u64) -> u32 {
    u32::try_from(l).unwrap_or(u32::MAX)
}

pub struct Poller {
    pool: SqlitePool,
    config: PollerConfig,
    client: Client,
}

impl Poller {
    pub fn new(pool: SqlitePool, config: PollerConfig, client: Client) -> Self {
        Poller {
            pool,
            config,
            client,
        }
    }

    /// Run the poll loop forever. Errors are logged and retried on the next
    /// tick; only the task being aborted stops the loop.
    pub async fn run(self) {
        info!("Indexer starting — contract: {}", self.config.contract_id);

        let mut cursor = Cursor::load(&self.pool, self.config.start_ledger).await;
        info!("Resuming from ledger {}", cursor.ledger);

        loop {
            if let Err(e) = self.poll_once(&mut cursor).await {
                error!("Indexer poll error: {e}");
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Fetch one page of events, store the new ones, and advance the cursor.
    async fn poll_once(&self, cursor: &mut Cursor) -> Result<()> {
        let (raw_events, next_page, latest_ledger) = rpc::fetch_events(
            &self.client,
            &self.config.rpc_url,
            &self.config.contract_id,
            cursor.ledger,
            cursor.page.as_deref(),
            self.config.events_per_page,
        )
        .await?;

        if !raw_events.is_empty() {
            let decoded = rpc::decode_events(&raw_events, &self.config.contract_id);
            let inserted = db::insert_events(&self.pool, &decoded).await?;
            info!(
                "Polled {} raw events → {} new records stored",
                raw_events.len(),
                inserted
            );
        }

        cursor.advance(&self.pool, latest_ledger, next_page).await
    }
}
