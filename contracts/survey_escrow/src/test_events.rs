extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Bytes, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{ControllerChanged, RewardPaid, SurveyCreated, SurveyFunded, VaultDrained};
use crate::{SurveyEscrow, SurveyEscrowClient};

const REWARD: i128 = 1_000_000_000;

fn setup() -> (
    Env,
    SurveyEscrowClient<'static>,
    token::StellarAssetClient<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(SurveyEscrow, ());
    let client = SurveyEscrowClient::new(&env, &contract_id);

    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    client.init(&sac.address());

    let token_sac = token::StellarAssetClient::new(&env, &sac.address());
    (env, client, token_sac)
}

fn dummy_proof(env: &Env) -> Bytes {
    Bytes::from_array(env, &[0xabu8; 32])
}

#[test]
fn test_survey_created_event() {
    let (env, client, _) = setup();
    let owner = Address::generate(&env);
    let controller = Address::generate(&env);

    client.create_survey(
        &owner,
        &7,
        &String::from_str(&env, "customer-nps-q3"),
        &controller,
        &10,
        &REWARD,
    );

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), owner, survey_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        owner.into_val(&env),
        7u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: SurveyCreated struct
    let event_data: SurveyCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        SurveyCreated {
            survey_id: 7,
            owner: owner.clone(),
            controller: controller.clone(),
            participant_limit: 10,
            reward_amount: REWARD,
        }
    );
}

#[test]
fn test_survey_funded_event() {
    let (env, client, token_sac) = setup();
    let owner = Address::generate(&env);
    let controller = Address::generate(&env);
    token_sac.mint(&owner, &(REWARD * 10));

    client.create_survey(
        &owner,
        &1,
        &String::from_str(&env, "customer-nps-q3"),
        &controller,
        &10,
        &REWARD,
    );
    client.fund_survey(&owner, &owner, &1, &(REWARD * 10), &10);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("funded").into_val(&env),
        owner.into_val(&env),
        1u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: SurveyFunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        SurveyFunded {
            survey_id: 1,
            owner: owner.clone(),
            amount: REWARD * 10,
            vault: REWARD * 10,
        }
    );
}

#[test]
fn test_reward_paid_event() {
    let (env, client, token_sac) = setup();
    let owner = Address::generate(&env);
    let controller = Address::generate(&env);
    let participant = Address::generate(&env);
    token_sac.mint(&owner, &(REWARD * 10));

    client.create_survey(
        &owner,
        &1,
        &String::from_str(&env, "customer-nps-q3"),
        &controller,
        &10,
        &REWARD,
    );
    client.fund_survey(&owner, &owner, &1, &(REWARD * 10), &10);
    client.payout(&controller, &owner, &1, &participant, &dummy_proof(&env));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("paid").into_val(&env),
        owner.into_val(&env),
        1u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: RewardPaid = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RewardPaid {
            survey_id: 1,
            owner: owner.clone(),
            participant: participant.clone(),
            amount: REWARD,
            participant_count: 1,
        }
    );
}

#[test]
fn test_controller_changed_event() {
    let (env, client, _) = setup();
    let owner = Address::generate(&env);
    let controller = Address::generate(&env);
    let new_controller = Address::generate(&env);

    client.create_survey(
        &owner,
        &1,
        &String::from_str(&env, "customer-nps-q3"),
        &controller,
        &10,
        &REWARD,
    );
    client.change_controller(&owner, &owner, &1, &new_controller);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("ctrl_set").into_val(&env),
        owner.into_val(&env),
        1u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ControllerChanged = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ControllerChanged {
            survey_id: 1,
            owner: owner.clone(),
            old_controller: controller.clone(),
            new_controller: new_controller.clone(),
        }
    );
}

#[test]
fn test_vault_drained_event() {
    let (env, client, token_sac) = setup();
    let owner = Address::generate(&env);
    let controller = Address::generate(&env);
    token_sac.mint(&owner, &(REWARD * 5));

    client.create_survey(
        &owner,
        &1,
        &String::from_str(&env, "customer-nps-q3"),
        &controller,
        &10,
        &REWARD,
    );
    client.fund_survey(&owner, &owner, &1, &(REWARD * 5), &5);
    client.emergency_withdraw(&controller, &owner, &1);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("drained").into_val(&env),
        owner.into_val(&env),
        1u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: VaultDrained = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        VaultDrained {
            survey_id: 1,
            owner: owner.clone(),
            amount: REWARD * 5,
        }
    );
}
