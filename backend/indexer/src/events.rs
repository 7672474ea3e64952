//! Canonical event types emitted by the survey escrow contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/survey_escrow/src/events.rs`.
//!
//! Fields that participate in the store's dedup tuple (`owner`, `survey_id`,
//! `participant`, `tx_hash`) are plain strings, empty when the event does not
//! carry them — the unique index that makes inserts idempotent cannot tolerate
//! NULLs, which SQLite treats as pairwise distinct.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the survey escrow contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new survey was created (`created` topic).
    SurveyCreated,
    /// The owner deposited funds into a vault (`funded` topic).
    SurveyFunded,
    /// A participant received their reward (`paid` topic).
    RewardPaid,
    /// The owner rotated a survey's controller (`ctrl_set` topic).
    ControllerChanged,
    /// The controller drained a vault back to the owner (`drained` topic).
    VaultDrained,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::SurveyCreated,
            "funded" => Self::SurveyFunded,
            "paid" => Self::RewardPaid,
            "ctrl_set" => Self::ControllerChanged,
            "drained" => Self::VaultDrained,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SurveyCreated => "survey_created",
            Self::SurveyFunded => "survey_funded",
            Self::RewardPaid => "reward_paid",
            Self::ControllerChanged => "controller_changed",
            Self::VaultDrained => "vault_drained",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded survey escrow event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyEvent {
    pub event_type: String,
    /// Survey owner address (second topic entry); empty if missing.
    pub owner: String,
    /// Owner-scoped survey identifier (third topic entry); empty if missing.
    pub survey_id: String,
    /// Participant address for payout events; empty otherwise.
    pub participant: String,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    /// Transaction hash; empty when the RPC omits it.
    pub tx_hash: String,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub owner: String,
    pub survey_id: String,
    pub participant: String,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: String,
    pub created_at: i64,
}
