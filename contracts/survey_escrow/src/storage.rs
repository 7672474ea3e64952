//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the escrow:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key        | Type      | Description                          |
//! |------------|-----------|--------------------------------------|
//! | `Token`    | `Address` | Escrow asset contract, set by `init` |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                                | Type            | Description                    |
//! |------------------------------------|-----------------|--------------------------------|
//! | `Config(owner, id)`                | `SurveyConfig`  | Immutable survey configuration |
//! | `State(owner, id)`                 | `SurveyState`   | Mutable survey state           |
//! | `Participation(owner, id, addr)`   | `Participation` | Payout dedup marker            |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! ## Keys as address derivation
//!
//! The key variants *are* the deterministic sub-account derivation: each
//! embeds its full seed tuple, so identical seeds always address the identical
//! ledger entry and any caller can pre-compute the location of a survey or a
//! participation marker without a directory. The host's create-if-absent
//! semantics at these keys (a `has` check followed by `set` inside one atomic
//! transition) are what make the dedup and re-initialization guards correct
//! even under concurrent submissions.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Participation, Survey, SurveyConfig, SurveyState};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// The instance-tier key (`Token`) lives as long as the contract. The
/// persistent-tier keys hold per-survey data with independent TTLs and carry
/// their seed tuples directly.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Escrow asset contract address (Instance).
    Token,
    /// Immutable survey configuration keyed by (owner, survey_id) (Persistent).
    Config(Address, u64),
    /// Mutable survey state keyed by (owner, survey_id) (Persistent).
    State(Address, u64),
    /// Payout dedup marker keyed by (owner, survey_id, participant) (Persistent).
    Participation(Address, u64, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Return `true` once the escrow asset has been configured by `init`.
pub fn has_token(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Token)
}

/// Store the escrow asset contract address.
pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

/// Retrieve the escrow asset contract address, or `None` before `init`.
pub fn get_token(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Token)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Return `true` if a survey already exists at the derived key.
pub fn has_survey(env: &Env, owner: &Address, survey_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Config(owner.clone(), survey_id))
}

/// Save both the immutable config and initial mutable state for a new survey.
pub fn save_survey(env: &Env, config: &SurveyConfig, state: &SurveyState) {
    let config_key = DataKey::Config(config.owner.clone(), config.survey_id);
    let state_key = DataKey::State(config.owner.clone(), config.survey_id);

    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load only the immutable survey configuration, or `None` if absent.
pub fn load_config(env: &Env, owner: &Address, survey_id: u64) -> Option<SurveyConfig> {
    let key = DataKey::Config(owner.clone(), survey_id);
    let config: Option<SurveyConfig> = env.storage().persistent().get(&key);
    if config.is_some() {
        bump_persistent(env, &key);
    }
    config
}

/// Load only the mutable survey state, or `None` if absent.
pub fn load_state(env: &Env, owner: &Address, survey_id: u64) -> Option<SurveyState> {
    let key = DataKey::State(owner.clone(), survey_id);
    let state: Option<SurveyState> = env.storage().persistent().get(&key);
    if state.is_some() {
        bump_persistent(env, &key);
    }
    state
}

/// Save only the mutable survey state (the hot path for payouts).
pub fn save_state(env: &Env, owner: &Address, survey_id: u64, state: &SurveyState) {
    let key = DataKey::State(owner.clone(), survey_id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Reconstruct the full `Survey` by combining config and state.
pub fn load_survey(env: &Env, owner: &Address, survey_id: u64) -> Option<Survey> {
    let config = load_config(env, owner, survey_id)?;
    let state = load_state(env, owner, survey_id)?;
    Some(Survey {
        survey_id: config.survey_id,
        name: config.name,
        owner: config.owner,
        controller: state.controller,
        participant_limit: config.participant_limit,
        reward_amount: config.reward_amount,
        participant_count: state.participant_count,
        vault: state.vault,
    })
}

// ── Participation Markers ────────────────────────────────────────────

/// Return `true` if `participant` already holds a marker for this survey.
pub fn has_participation(env: &Env, owner: &Address, survey_id: u64, participant: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Participation(owner.clone(), survey_id, participant.clone()))
}

/// Create the participation marker. Callers must have checked
/// [`has_participation`] first; the check-then-set pair is atomic because the
/// whole transition executes as one host transaction.
pub fn save_participation(
    env: &Env,
    owner: &Address,
    survey_id: u64,
    participant: &Address,
    marker: &Participation,
) {
    let key = DataKey::Participation(owner.clone(), survey_id, participant.clone());
    env.storage().persistent().set(&key, marker);
    bump_persistent(env, &key);
}

/// Load a participation marker, or `None` if the participant was never paid.
pub fn load_participation(
    env: &Env,
    owner: &Address,
    survey_id: u64,
    participant: &Address,
) -> Option<Participation> {
    let key = DataKey::Participation(owner.clone(), survey_id, participant.clone());
    let marker: Option<Participation> = env.storage().persistent().get(&key);
    if marker.is_some() {
        bump_persistent(env, &key);
    }
    marker
}
