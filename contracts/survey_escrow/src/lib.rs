//! # Survey Escrow Contract
//!
//! This is the root crate of the survey reward escrow. It exposes the single
//! Soroban contract `SurveyEscrow` whose entry points cover the full campaign
//! lifecycle:
//!
//! | Phase      | Entry Point(s)                                  |
//! |------------|-------------------------------------------------|
//! | Bootstrap  | [`SurveyEscrow::init`]                          |
//! | Creation   | [`SurveyEscrow::create_survey`]                 |
//! | Funding    | [`SurveyEscrow::fund_survey`]                   |
//! | Payouts    | [`SurveyEscrow::payout`]                        |
//! | Governance | [`SurveyEscrow::change_controller`], [`SurveyEscrow::emergency_withdraw`] |
//! | Queries    | `get_survey`, `has_participation`, `get_participation` |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`]; event emission to
//! [`events`]. This file contains **only** the public entry points and their
//! precondition checks — every check runs before any mutation, and a failed
//! check aborts the whole transition with no state change (the host rolls
//! back on `panic_with_error!`).
//!
//! ## Authorization model
//!
//! Two independently rotatable identities per survey: the immutable `owner`
//! (funds the survey, rotates the controller) and the mutable `controller`
//! (disburses payouts, triggers the emergency drain). The `proof` passed to
//! [`SurveyEscrow::payout`] is an opaque credential produced by an off-chain
//! verifier; the contract stores it on the participation marker but never
//! interprets it.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Bytes, Env, String,
};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_payout;

pub use types::{Participation, Survey, SurveyConfig, SurveyState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized     = 2,
    SurveyNotFound     = 3,
    AlreadyExists      = 4,
    NotOwner           = 5,
    NotController      = 6,
    AlreadyPaid        = 7,
    LimitReached       = 8,
    InsufficientFunds  = 9,
    InvalidLimit       = 10,
    InvalidReward      = 11,
}

#[contract]
pub struct SurveyEscrow;

#[contractimpl]
impl SurveyEscrow {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Configure the escrow asset (e.g. the native asset's SAC).
    ///
    /// Must be called exactly once after deployment. Subsequent calls panic
    /// with `Error::AlreadyInitialized`.
    pub fn init(env: Env, token: Address) {
        if storage::has_token(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        storage::set_token(&env, &token);
    }

    // ─────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────

    /// Create a new survey. The authorizing `owner` becomes its root
    /// authority; `survey_id` is owner-scoped, so one owner can run several
    /// surveys concurrently.
    ///
    /// Fails with `AlreadyExists` if a survey already sits at the
    /// `(owner, survey_id)` key, `InvalidLimit` / `InvalidReward` on
    /// non-positive parameters.
    pub fn create_survey(
        env: Env,
        owner: Address,
        survey_id: u64,
        name: String,
        controller: Address,
        participant_limit: u64,
        reward_amount: i128,
    ) -> Survey {
        owner.require_auth();
        require_initialized(&env);

        if storage::has_survey(&env, &owner, survey_id) {
            panic_with_error!(&env, Error::AlreadyExists);
        }
        if participant_limit == 0 {
            panic_with_error!(&env, Error::InvalidLimit);
        }
        if reward_amount <= 0 {
            panic_with_error!(&env, Error::InvalidReward);
        }

        let config = SurveyConfig {
            survey_id,
            name,
            owner: owner.clone(),
            participant_limit,
            reward_amount,
        };
        let state = SurveyState {
            controller: controller.clone(),
            participant_count: 0,
            vault: 0,
        };
        storage::save_survey(&env, &config, &state);

        events::survey_created(
            &env,
            events::SurveyCreated {
                survey_id,
                owner: owner.clone(),
                controller,
                participant_limit,
                reward_amount,
            },
        );

        storage::load_survey(&env, &owner, survey_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::SurveyNotFound))
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Deposit `amount` of the escrow asset into the survey's vault.
    ///
    /// Only the owner may fund. The transfer always moves exactly `amount`;
    /// `participant_hint` is advisory — when
    /// `reward_amount * participant_hint > amount` the call fails fast with
    /// `InsufficientFunds` before any transfer, guarding against under-funded
    /// campaigns. Funding is repeatable and amounts accumulate.
    pub fn fund_survey(
        env: Env,
        caller: Address,
        owner: Address,
        survey_id: u64,
        amount: i128,
        participant_hint: u64,
    ) {
        caller.require_auth();

        let config = load_config_or_panic(&env, &owner, survey_id);
        let mut state = load_state_or_panic(&env, &owner, survey_id);

        if caller != config.owner {
            panic_with_error!(&env, Error::NotOwner);
        }

        // Advisory capacity check: the declared participant target must be
        // coverable by this deposit alone.
        let required = config
            .reward_amount
            .checked_mul(participant_hint as i128)
            .unwrap_or_else(|| panic_with_error!(&env, Error::InsufficientFunds));
        if amount < required {
            panic_with_error!(&env, Error::InsufficientFunds);
        }

        let token_client = token::Client::new(&env, &escrow_token(&env));
        if token_client.balance(&caller) < amount {
            panic_with_error!(&env, Error::InsufficientFunds);
        }
        token_client.transfer(&caller, &env.current_contract_address(), &amount);

        state.vault += amount;
        storage::save_state(&env, &owner, survey_id, &state);

        events::survey_funded(
            &env,
            events::SurveyFunded {
                survey_id,
                owner,
                amount,
                vault: state.vault,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Payouts
    // ─────────────────────────────────────────────────────────

    /// Pay the fixed reward to `participant`, at most once per participant.
    ///
    /// Only the current controller may call. Checks run in order, first
    /// failure wins: `NotController`, `LimitReached`, `AlreadyPaid`,
    /// `InsufficientFunds`. On success the participation marker is created
    /// (sealing the dedup guarantee), exactly `reward_amount` moves from the
    /// vault to the participant, and the count increments.
    ///
    /// `proof` is an opaque credential issued off-chain; it is stored on the
    /// marker verbatim and never interpreted here. A retried call for the
    /// same participant deterministically fails with `AlreadyPaid` rather
    /// than double-paying.
    ///
    /// Returns the new `participant_count`.
    pub fn payout(
        env: Env,
        caller: Address,
        owner: Address,
        survey_id: u64,
        participant: Address,
        proof: Bytes,
    ) -> u64 {
        caller.require_auth();

        let config = load_config_or_panic(&env, &owner, survey_id);
        let mut state = load_state_or_panic(&env, &owner, survey_id);

        if caller != state.controller {
            panic_with_error!(&env, Error::NotController);
        }
        if state.participant_count >= config.participant_limit {
            panic_with_error!(&env, Error::LimitReached);
        }
        if storage::has_participation(&env, &owner, survey_id, &participant) {
            panic_with_error!(&env, Error::AlreadyPaid);
        }
        if state.vault < config.reward_amount {
            panic_with_error!(&env, Error::InsufficientFunds);
        }

        storage::save_participation(
            &env,
            &owner,
            survey_id,
            &participant,
            &Participation { proof },
        );

        let token_client = token::Client::new(&env, &escrow_token(&env));
        token_client.transfer(
            &env.current_contract_address(),
            &participant,
            &config.reward_amount,
        );

        state.participant_count += 1;
        state.vault -= config.reward_amount;
        storage::save_state(&env, &owner, survey_id, &state);

        events::reward_paid(
            &env,
            events::RewardPaid {
                survey_id,
                owner,
                participant,
                amount: config.reward_amount,
                participant_count: state.participant_count,
            },
        );

        state.participant_count
    }

    // ─────────────────────────────────────────────────────────
    // Governance
    // ─────────────────────────────────────────────────────────

    /// Rotate the survey's controller. Owner-only.
    ///
    /// Takes effect immediately: any payout or drain submitted by the old
    /// controller after this commits fails with `NotController`.
    pub fn change_controller(
        env: Env,
        caller: Address,
        owner: Address,
        survey_id: u64,
        new_controller: Address,
    ) {
        caller.require_auth();

        let config = load_config_or_panic(&env, &owner, survey_id);
        let mut state = load_state_or_panic(&env, &owner, survey_id);

        if caller != config.owner {
            panic_with_error!(&env, Error::NotOwner);
        }

        let old_controller = state.controller.clone();
        state.controller = new_controller.clone();
        storage::save_state(&env, &owner, survey_id, &state);

        events::controller_changed(
            &env,
            events::ControllerChanged {
                survey_id,
                owner,
                old_controller,
                new_controller,
            },
        );
    }

    /// Drain the survey's entire vault balance back to the owner.
    ///
    /// Controller-gated so automated recovery flows can trigger it; the
    /// destination is always the owner regardless of who calls. Leaves
    /// `participant_count` and all markers untouched. Returns the drained
    /// amount.
    pub fn emergency_withdraw(env: Env, caller: Address, owner: Address, survey_id: u64) -> i128 {
        caller.require_auth();

        let _config = load_config_or_panic(&env, &owner, survey_id);
        let mut state = load_state_or_panic(&env, &owner, survey_id);

        if caller != state.controller {
            panic_with_error!(&env, Error::NotController);
        }

        let amount = state.vault;
        if amount > 0 {
            let token_client = token::Client::new(&env, &escrow_token(&env));
            token_client.transfer(&env.current_contract_address(), &owner, &amount);
        }
        state.vault = 0;
        storage::save_state(&env, &owner, survey_id, &state);

        events::vault_drained(
            &env,
            events::VaultDrained {
                survey_id,
                owner,
                amount,
            },
        );

        amount
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a survey by its `(owner, survey_id)` key.
    pub fn get_survey(env: Env, owner: Address, survey_id: u64) -> Survey {
        storage::load_survey(&env, &owner, survey_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::SurveyNotFound))
    }

    /// Return `true` if `participant` has already been paid for this survey.
    pub fn has_participation(env: Env, owner: Address, survey_id: u64, participant: Address) -> bool {
        storage::has_participation(&env, &owner, survey_id, &participant)
    }

    /// Retrieve a participation marker, including the proof it was created
    /// with. Fails with `SurveyNotFound` if the participant was never paid.
    pub fn get_participation(
        env: Env,
        owner: Address,
        survey_id: u64,
        participant: Address,
    ) -> Participation {
        storage::load_participation(&env, &owner, survey_id, &participant)
            .unwrap_or_else(|| panic_with_error!(&env, Error::SurveyNotFound))
    }
}

// ─────────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────────

fn require_initialized(env: &Env) {
    if !storage::has_token(env) {
        panic_with_error!(env, Error::NotInitialized);
    }
}

fn escrow_token(env: &Env) -> Address {
    storage::get_token(env).unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

fn load_config_or_panic(env: &Env, owner: &Address, survey_id: u64) -> SurveyConfig {
    storage::load_config(env, owner, survey_id)
        .unwrap_or_else(|| panic_with_error!(env, Error::SurveyNotFound))
}

fn load_state_or_panic(env: &Env, owner: &Address, survey_id: u64) -> SurveyState {
    storage::load_state(env, owner, survey_id)
        .unwrap_or_else(|| panic_with_error!(env, Error::SurveyNotFound))
}
