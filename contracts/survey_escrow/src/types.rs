//! # Types
//!
//! Shared data structures used across all modules of the survey escrow.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Survey` is internally stored as two separate ledger entries:
//!
//! - [`SurveyConfig`] — written once at creation; never mutated.
//! - [`SurveyState`] — written on every fund, payout, controller rotation
//!   and emergency withdrawal.
//!
//! The public API exposes the reconstructed [`Survey`] struct for convenience.
//!
//! ### Two independently rotatable identities
//!
//! `owner` (immutable, lives in config) is the root authority: it funds the
//! survey and rotates the controller. `controller` (mutable, lives in state)
//! is the delegated operator: it disburses payouts and may trigger the
//! emergency drain. The controller may equal the owner but need not.
//!
//! ### Vault
//!
//! Escrowed funds are held by the contract itself in the configured escrow
//! asset. The `vault` field partitions the contract's balance per survey, so
//! one survey can never spend another survey's funds.

use soroban_sdk::{contracttype, Address, Bytes, String};

/// Immutable survey configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SurveyConfig {
    /// Caller-chosen identifier; part of the storage key, so one owner can
    /// run multiple concurrent surveys.
    pub survey_id: u64,
    /// Human-readable campaign label (uninterpreted).
    pub name: String,
    /// Root authority; the address that created the survey.
    pub owner: Address,
    /// Maximum distinct participants ever eligible for a payout.
    pub participant_limit: u64,
    /// Fixed amount paid per participant, in the escrow asset.
    pub reward_amount: i128,
}

/// Mutable survey state, updated by fund/payout/rotation/drain.
///
/// Kept small so the frequent writes (payouts) are cheap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SurveyState {
    /// Delegated operator authorized for `payout` and `emergency_withdraw`.
    pub controller: Address,
    /// Running count of successful payouts; monotonic, bounded by
    /// `participant_limit`.
    pub participant_count: u64,
    /// This survey's share of the contract's escrow-asset balance.
    pub vault: i128,
}

/// Full representation of a survey, reconstructed from the split
/// `SurveyConfig` + `SurveyState` storage entries. Public API return type.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Survey {
    pub survey_id: u64,
    pub name: String,
    pub owner: Address,
    pub controller: Address,
    pub participant_limit: u64,
    pub reward_amount: i128,
    pub participant_count: u64,
    pub vault: i128,
}

/// Permanent per-(survey, participant) marker created on the first successful
/// payout. Its existence is the sole deduplication guarantee; it is never
/// deleted or reused. The opaque proof supplied with the payout is retained
/// for off-chain auditing but never interpreted on-chain.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Participation {
    pub proof: Bytes,
}
