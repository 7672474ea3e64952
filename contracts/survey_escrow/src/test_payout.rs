extern crate std;

use soroban_sdk::{testutils::Address as _, token, Address, Bytes, Env, String};

use crate::invariants;
use crate::{Error, SurveyEscrow, SurveyEscrowClient};

const REWARD: i128 = 1_000_000_000;

fn setup() -> (
    Env,
    SurveyEscrowClient<'static>,
    token::StellarAssetClient<'static>,
    token::Client<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(SurveyEscrow, ());
    let client = SurveyEscrowClient::new(&env, &contract_id);

    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    client.init(&sac.address());

    let token_sac = token::StellarAssetClient::new(&env, &sac.address());
    let token_client = token::Client::new(&env, &sac.address());
    (env, client, token_sac, token_client)
}

/// Create a survey with the given limit and fund it with `funding`.
fn funded_survey(
    env: &Env,
    client: &SurveyEscrowClient,
    token_sac: &token::StellarAssetClient,
    limit: u64,
    funding: i128,
) -> (Address, Address) {
    let owner = Address::generate(env);
    let controller = Address::generate(env);
    token_sac.mint(&owner, &funding);

    client.create_survey(
        &owner,
        &1,
        &String::from_str(env, "customer-nps-q3"),
        &controller,
        &limit,
        &REWARD,
    );
    if funding > 0 {
        client.fund_survey(&owner, &owner, &1, &funding, &0);
    }
    (owner, controller)
}

fn dummy_proof(env: &Env) -> Bytes {
    Bytes::from_array(env, &[0xabu8; 32])
}

#[test]
fn test_payout_pays_reward_once() {
    let (env, client, token_sac, token_client) = setup();
    let (owner, controller) = funded_survey(&env, &client, &token_sac, 10, REWARD * 10);
    let participant = Address::generate(&env);

    let count = client.payout(&controller, &owner, &1, &participant, &dummy_proof(&env));

    assert_eq!(count, 1);
    assert_eq!(token_client.balance(&participant), REWARD);

    let survey = client.get_survey(&owner, &1);
    assert_eq!(survey.participant_count, 1);
    assert_eq!(survey.vault, REWARD * 9);
    assert!(client.has_participation(&owner, &1, &participant));
    invariants::assert_all_survey_invariants(&survey);
}

#[test]
fn test_payout_not_controller() {
    let (env, client, token_sac, _) = setup();
    let (owner, _controller) = funded_survey(&env, &client, &token_sac, 10, REWARD * 10);
    let participant = Address::generate(&env);

    // Neither the owner nor the participant may disburse.
    let result = client.try_payout(&owner, &owner, &1, &participant, &dummy_proof(&env));
    assert_eq!(result, Err(Ok(Error::NotController.into())));
    let result = client.try_payout(&participant, &owner, &1, &participant, &dummy_proof(&env));
    assert_eq!(result, Err(Ok(Error::NotController.into())));

    assert_eq!(client.get_survey(&owner, &1).participant_count, 0);
}

#[test]
fn test_payout_same_participant_twice_fails() {
    let (env, client, token_sac, token_client) = setup();
    let (owner, controller) = funded_survey(&env, &client, &token_sac, 10, REWARD * 10);
    let participant = Address::generate(&env);

    client.payout(&controller, &owner, &1, &participant, &dummy_proof(&env));

    // The retry deterministically fails instead of double-paying, whatever
    // proof it carries.
    let result = client.try_payout(&controller, &owner, &1, &participant, &dummy_proof(&env));
    assert_eq!(result, Err(Ok(Error::AlreadyPaid.into())));
    let other_proof = Bytes::from_array(&env, &[0x01u8; 64]);
    let result = client.try_payout(&controller, &owner, &1, &participant, &other_proof);
    assert_eq!(result, Err(Ok(Error::AlreadyPaid.into())));

    // The failed attempts left every record unchanged.
    let survey = client.get_survey(&owner, &1);
    assert_eq!(survey.participant_count, 1);
    assert_eq!(survey.vault, REWARD * 9);
    assert_eq!(token_client.balance(&participant), REWARD);
}

#[test]
fn test_payout_distinct_participants() {
    let (env, client, token_sac, _) = setup();
    let (owner, controller) = funded_survey(&env, &client, &token_sac, 10, REWARD * 10);

    let mut count_before = 0u64;
    let participants: std::vec::Vec<Address> =
        (0..5).map(|_| Address::generate(&env)).collect();

    for participant in &participants {
        let count = client.payout(&controller, &owner, &1, participant, &dummy_proof(&env));
        invariants::assert_count_monotonic(count_before, count);
        assert_eq!(count, count_before + 1);
        count_before = count;
    }

    // One marker per distinct participant, never more.
    let survey = client.get_survey(&owner, &1);
    assert_eq!(survey.participant_count, 5);
    for participant in &participants {
        assert!(client.has_participation(&owner, &1, participant));
    }
    let unpaid = Address::generate(&env);
    assert!(!client.has_participation(&owner, &1, &unpaid));
}

#[test]
fn test_payout_limit_reached() {
    let (env, client, token_sac, _) = setup();
    let (owner, controller) = funded_survey(&env, &client, &token_sac, 2, REWARD * 10);

    let p1 = Address::generate(&env);
    let p2 = Address::generate(&env);
    client.payout(&controller, &owner, &1, &p1, &dummy_proof(&env));
    client.payout(&controller, &owner, &1, &p2, &dummy_proof(&env));

    // The (limit + 1)-th distinct participant always fails, even though the
    // vault still has funds.
    let p3 = Address::generate(&env);
    let result = client.try_payout(&controller, &owner, &1, &p3, &dummy_proof(&env));
    assert_eq!(result, Err(Ok(Error::LimitReached.into())));

    let survey = client.get_survey(&owner, &1);
    assert_eq!(survey.participant_count, 2);
    assert_eq!(survey.vault, REWARD * 8);
    assert!(!client.has_participation(&owner, &1, &p3));
}

#[test]
fn test_payout_insufficient_vault() {
    let (env, client, token_sac, _) = setup();
    // Vault holds half a reward.
    let (owner, controller) = funded_survey(&env, &client, &token_sac, 10, 500_000_000);
    let participant = Address::generate(&env);

    let result = client.try_payout(&controller, &owner, &1, &participant, &dummy_proof(&env));
    assert_eq!(result, Err(Ok(Error::InsufficientFunds.into())));

    // Vault unchanged, no marker created.
    let survey = client.get_survey(&owner, &1);
    assert_eq!(survey.vault, 500_000_000);
    assert_eq!(survey.participant_count, 0);
    assert!(!client.has_participation(&owner, &1, &participant));
}

#[test]
fn test_payout_survey_not_found() {
    let (env, client, _, _) = setup();
    let controller = Address::generate(&env);
    let owner = Address::generate(&env);
    let participant = Address::generate(&env);

    let result = client.try_payout(&controller, &owner, &9, &participant, &dummy_proof(&env));
    assert_eq!(result, Err(Ok(Error::SurveyNotFound.into())));
}

#[test]
fn test_payout_marker_retains_proof() {
    let (env, client, token_sac, _) = setup();
    let (owner, controller) = funded_survey(&env, &client, &token_sac, 10, REWARD * 10);
    let participant = Address::generate(&env);
    let proof = Bytes::from_array(&env, &[0x42u8; 48]);

    client.payout(&controller, &owner, &1, &participant, &proof);

    let marker = client.get_participation(&owner, &1, &participant);
    assert_eq!(marker.proof, proof);

    // An unpaid participant has no marker to fetch.
    let unpaid = Address::generate(&env);
    let result = client.try_get_participation(&owner, &1, &unpaid);
    assert_eq!(result, Err(Ok(Error::SurveyNotFound.into())));
}

#[test]
fn test_full_campaign_exhausts_vault_and_limit() {
    let (env, client, token_sac, token_client) = setup();
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
    assert_eq!(client.get_survey(&owner, &1).vault, 10_000_000_000);

    let original = client.get_survey(&owner, &1);

    for i in 0..10u64 {
        let participant = Address::generate(&env);
        let count = client.payout(&controller, &owner, &1, &participant, &dummy_proof(&env));
        assert_eq!(count, i + 1);
        assert_eq!(token_client.balance(&participant), REWARD);

        let survey = client.get_survey(&owner, &1);
        invariants::assert_all_survey_invariants(&survey);
        invariants::assert_conservation(&survey, REWARD * 10, 0);
        invariants::assert_config_immutable(&original, &survey);
    }

    let survey = client.get_survey(&owner, &1);
    assert_eq!(survey.vault, 0);
    assert_eq!(survey.participant_count, 10);

    // The eleventh distinct participant hits the cap, not the empty vault.
    let eleventh = Address::generate(&env);
    let result = client.try_payout(&controller, &owner, &1, &eleventh, &dummy_proof(&env));
    assert_eq!(result, Err(Ok(Error::LimitReached.into())));
}

#[test]
fn test_vault_conservation_across_fund_payout_drain() {
    let (env, client, token_sac, _) = setup();
    let owner = Address::generate(&env);
    let controller = Address::generate(&env);
    token_sac.mint(&owner, &(REWARD * 20));

    client.create_survey(
        &owner,
        &1,
        &String::from_str(&env, "customer-nps-q3"),
        &controller,
        &10,
        &REWARD,
    );

    client.fund_survey(&owner, &owner, &1, &(REWARD * 6), &6);
    let mut funded = REWARD * 6;

    let p1 = Address::generate(&env);
    let p2 = Address::generate(&env);
    client.payout(&controller, &owner, &1, &p1, &dummy_proof(&env));
    client.payout(&controller, &owner, &1, &p2, &dummy_proof(&env));
    invariants::assert_conservation(&client.get_survey(&owner, &1), funded, 0);

    client.fund_survey(&owner, &owner, &1, &(REWARD * 4), &4);
    funded += REWARD * 4;
    invariants::assert_conservation(&client.get_survey(&owner, &1), funded, 0);

    let drained = client.emergency_withdraw(&controller, &owner, &1);
    assert_eq!(drained, funded - REWARD * 2);
    invariants::assert_conservation(&client.get_survey(&owner, &1), funded, drained);
}
