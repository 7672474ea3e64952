//! Contract events.
//!
//! Every state transition publishes one event so off-chain consumers (the
//! `backend/indexer` crate in this workspace) can reconstruct a survey's
//! history without re-reading ledger entries. Topics are
//! `(symbol, owner, survey_id)` so a consumer can filter per survey; the data
//! payload is a `#[contracttype]` struct.
//!
//! | Topic      | Payload               |
//! |------------|-----------------------|
//! | `created`  | [`SurveyCreated`]     |
//! | `funded`   | [`SurveyFunded`]      |
//! | `paid`     | [`RewardPaid`]        |
//! | `ctrl_set` | [`ControllerChanged`] |
//! | `drained`  | [`VaultDrained`]      |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// A new survey was created (`created`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SurveyCreated {
    pub survey_id: u64,
    pub owner: Address,
    pub controller: Address,
    pub participant_limit: u64,
    pub reward_amount: i128,
}

/// The owner deposited funds into the vault (`funded`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SurveyFunded {
    pub survey_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub vault: i128,
}

/// A participant received their reward (`paid`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaid {
    pub survey_id: u64,
    pub owner: Address,
    pub participant: Address,
    pub amount: i128,
    pub participant_count: u64,
}

/// The owner rotated the controller (`ctrl_set`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ControllerChanged {
    pub survey_id: u64,
    pub owner: Address,
    pub old_controller: Address,
    pub new_controller: Address,
}

/// The controller drained the vault back to the owner (`drained`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultDrained {
    pub survey_id: u64,
    pub owner: Address,
    pub amount: i128,
}

pub fn survey_created(env: &Env, event: SurveyCreated) {
    env.events().publish(
        (symbol_short!("created"), event.owner.clone(), event.survey_id),
        event,
    );
}

pub fn survey_funded(env: &Env, event: SurveyFunded) {
    env.events().publish(
        (symbol_short!("funded"), event.owner.clone(), event.survey_id),
        event,
    );
}

pub fn reward_paid(env: &Env, event: RewardPaid) {
    env.events().publish(
        (symbol_short!("paid"), event.owner.clone(), event.survey_id),
        event,
    );
}

pub fn controller_changed(env: &Env, event: ControllerChanged) {
    env.events().publish(
        (symbol_short!("ctrl_set"), event.owner.clone(), event.survey_id),
        event,
    );
}

pub fn vault_drained(env: &Env, event: VaultDrained) {
    env.events().publish(
        (symbol_short!("drained"), event.owner.clone(), event.survey_id),
        event,
    );
}
