extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Bytes, Env, IntoVal, String, TryIntoVal,
};

use crate::constants::CENTS;
use crate::events::{
    BulkReviewed, DepositReviewed, DepositSubmitted, ManualCredited, PlanActivated,
    ReferralUpdated, WithdrawalRequested, WithdrawalReviewed,
};
use crate::storage::DataKey;
use crate::{AlphaLedger, AlphaLedgerClient, DepositPlan, EntryStatus, PayoutMethod, Plan, Role};

fn setup() -> (Env, AlphaLedgerClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(AlphaLedger, ());
    let client = AlphaLedgerClient::new(&env, &contract_id);
    let super_admin = Address::generate(&env);
    let admin = Address::generate(&env);
    let investor = Address::generate(&env);
    client.init(
        &super_admin,
        &investor,
        &String::from_str(&env, "maria"),
        &Some(String::from_str(&env, "DEMOREF")),
    );
    client.grant_role(&super_admin, &admin, &Role::Admin);
    (env, client, admin, investor)
}

fn submit(env: &Env, client: &AlphaLedgerClient, investor: &Address, plan: DepositPlan) -> u64 {
    client.submit_deposit(
        investor,
        &Bytes::from_slice(env, b"receipt"),
        &plan,
        &String::from_str(env, ""),
    )
}

#[test]
fn test_deposit_submitted_event() {
    let (env, client, _admin, investor) = setup();
    let id = submit(&env, &client, &investor, DepositPlan::Premium);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("dep_sub"), deposit_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("dep_sub").into_val(&env), id.into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: DepositSubmitted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, DepositSubmitted {
        deposit_id: id,
        plan: DepositPlan::Premium,
    });
}

#[test]
fn test_deposit_reviewed_event() {
    let (env, client, admin, investor) = setup();
    let id = submit(&env, &client, &investor, DepositPlan::General);
    client.approve_deposit(&admin, &id, &(7_500 * CENTS));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&env, symbol_short!("dep_rev").into_val(&env), id.into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: DepositReviewed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, DepositReviewed {
        deposit_id: id,
        status: EntryStatus::Approved,
        amount: 7_500 * CENTS,
    });
}

#[test]
fn test_bulk_reviewed_event() {
    let (env, client, admin, investor) = setup();
    submit(&env, &client, &investor, DepositPlan::General);
    submit(&env, &client, &investor, DepositPlan::General);
    client.bulk_reject_pending(&admin);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&env, symbol_short!("dep_bulk").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: BulkReviewed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, BulkReviewed {
        status: EntryStatus::Rejected,
        count: 2,
    });
}

#[test]
fn test_plan_activated_event() {
    let (env, client, admin, investor) = setup();
    let id = submit(&env, &client, &investor, DepositPlan::Basic);
    client.approve_deposit(&admin, &id, &(4_000 * CENTS));
    client.activate_plan(&investor, &Plan::Basic, &(3_000 * CENTS));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&env, symbol_short!("staked").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: PlanActivated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, PlanActivated {
        plan: Plan::Basic,
        amount: 3_000 * CENTS,
        wallet_balance: 1_000 * CENTS,
    });
}

#[test]
fn test_withdrawal_events() {
    let (env, client, admin, investor) = setup();
    client.manual_credit(
        &admin,
        &String::from_str(&env, "maria"),
        &(500 * CENTS),
        &String::from_str(&env, ""),
    );
    let id = client.submit_withdrawal(
        &investor,
        &PayoutMethod::BankTransfer,
        &String::from_str(&env, "BDO 0012"),
        &(200 * CENTS),
    );

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![&env, symbol_short!("wd_req").into_val(&env), id.into_val(&env)];
    assert_eq!(last_event.1, expected_topics);
    let event_data: WithdrawalRequested = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, WithdrawalRequested {
        withdrawal_id: id,
        amount: 200 * CENTS,
        method: PayoutMethod::BankTransfer,
    });

    client.reject_withdrawal(&admin, &id);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![&env, symbol_short!("wd_rev").into_val(&env), id.into_val(&env)];
    assert_eq!(last_event.1, expected_topics);
    let event_data: WithdrawalReviewed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, WithdrawalReviewed {
        withdrawal_id: id,
        status: EntryStatus::Rejected,
        amount: 200 * CENTS,
    });
}

#[test]
fn test_credit_events() {
    let (env, client, admin, _investor) = setup();
    let user = String::from_str(&env, "maria");
    client.manual_credit(&admin, &user, &(50 * CENTS), &String::from_str(&env, "promo"));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.1, vec![&env, symbol_short!("credited").into_val(&env)]);
    let event_data: ManualCredited = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, ManualCredited {
        user,
        amount: 50 * CENTS,
    });

    client.register_referral(&admin, &(1_000 * CENTS), &true);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.1, vec![&env, symbol_short!("referral").into_val(&env)]);
    let event_data: ReferralUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, ReferralUpdated {
        balance: 0,
        total_referrals: 1,
    });
}

#[test]
fn test_log_cleared_event() {
    let (env, client, admin, investor) = setup();
    submit(&env, &client, &investor, DepositPlan::General);
    client.clear_log(&admin);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.1, vec![&env, symbol_short!("log_clr").into_val(&env)]);
    let removed: u32 = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(removed, 1);
}

#[test]
fn test_record_reset_event_on_malformed_record() {
    let (env, client, _admin, _investor) = setup();
    env.as_contract(&client.address, || {
        env.storage().persistent().set(&DataKey::Record, &7u32);
    });
    client.record();

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    assert_eq!(last_event.1, vec![&env, symbol_short!("rec_rst").into_val(&env)]);
}

#[test]
fn test_record_imported_event() {
    let (env, client, admin, _investor) = setup();
    let rec = client.record();
    let version = client.import_record(&admin, &rec, &rec.version);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.1, vec![&env, symbol_short!("rec_imp").into_val(&env)]);
    let data: u64 = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(data, version);
}
