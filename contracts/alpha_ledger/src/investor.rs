//! # Investor workflow
//!
//! State transitions triggered by the investor. Each function validates its
//! input, mutates the in-memory record and appends one log entry. Nothing is
//! persisted here; on `Err` the caller discards the record.
//!
//! | Operation           | Balance effect                                   |
//! |---------------------|--------------------------------------------------|
//! | `submit_deposit`    | none until an admin approves                     |
//! | `activate_plan`     | wallet -> staked                                 |
//! | `submit_withdrawal` | debited immediately, wallet first then referral  |

use soroban_sdk::{Bytes, Env, String};

use crate::activity;
use crate::constants::MAX_RECEIPT_LEN;
use crate::text;
use crate::types::{
    AccountRecord, Deposit, DepositPlan, EntryStatus, LogAction, PayoutMethod, Plan, Withdrawal,
};
use crate::Error;

/// Record a receipt upload as a pending deposit. Only the receipt's hash
/// goes into the record. Returns the deposit id.
pub fn submit_deposit(
    env: &Env,
    record: &mut AccountRecord,
    receipt: &Bytes,
    plan: DepositPlan,
    note: String,
    now: u64,
) -> Result<u64, Error> {
    if receipt.is_empty() {
        return Err(Error::MissingReceipt);
    }
    if receipt.len() > MAX_RECEIPT_LEN {
        return Err(Error::FieldTooLong);
    }
    text::check_len(&note)?;

    let id = activity::take_id(&mut record.next_ids.deposit)?;
    record.deposits.push_back(Deposit {
        id,
        receipt_hash: env.crypto().sha256(receipt).to_bytes(),
        plan,
        note: note.clone(),
        status: EntryStatus::Pending,
        date: now,
        approved_amount: 0,
        approved_at: None,
        rejected_at: None,
    });
    activity::append(record, LogAction::DepositUploaded, Some(id), None, note, now)?;
    Ok(id)
}

/// Move `amount` from the wallet into `plan`. Returns the new wallet balance.
pub fn activate_plan(
    env: &Env,
    record: &mut AccountRecord,
    plan: Plan,
    amount: i128,
    now: u64,
) -> Result<i128, Error> {
    // Plans are funded only from admin-credited money.
    if record.wallet_balance <= 0 {
        return Err(Error::NoWalletCredit);
    }
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if !plan.accepts(amount) {
        return Err(Error::AmountOutOfRange);
    }
    if amount > record.wallet_balance {
        return Err(Error::InsufficientBalance);
    }

    record.wallet_balance -= amount;
    record.total_staked = record
        .total_staked
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    record.stats.active_plans = record
        .stats
        .active_plans
        .checked_add(1)
        .ok_or(Error::Overflow)?;

    activity::append(
        record,
        LogAction::Staked(plan),
        None,
        Some(amount),
        String::from_str(env, plan.name()),
        now,
    )?;
    Ok(record.wallet_balance)
}

/// Request a payout. The amount is debited now: wallet first, the remainder
/// from the referral balance. Returns the withdrawal id.
pub fn submit_withdrawal(
    record: &mut AccountRecord,
    method: PayoutMethod,
    account: String,
    amount: i128,
    now: u64,
) -> Result<u64, Error> {
    text::check_len(&account)?;
    if text::is_blank(&account) {
        return Err(Error::MissingAccount);
    }
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    let available = record
        .wallet_balance
        .checked_add(record.referral.balance)
        .ok_or(Error::Overflow)?;
    if amount > available {
        return Err(Error::InsufficientBalance);
    }

    let from_wallet = amount.min(record.wallet_balance.max(0));
    let from_referral = amount - from_wallet;
    record.wallet_balance -= from_wallet;
    record.referral.balance -= from_referral;

    let id = activity::take_id(&mut record.next_ids.withdrawal)?;
    record.withdrawals.push_back(Withdrawal {
        id,
        amount,
        method,
        account: account.clone(),
        status: EntryStatus::Pending,
        date: now,
        approved_at: None,
        rejected_at: None,
        from_wallet,
        from_referral,
    });
    activity::append(
        record,
        LogAction::WithdrawalRequested,
        Some(id),
        Some(amount),
        account,
        now,
    )?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::constants::CENTS;
    use crate::invariants::assert_record_invariants;
    use crate::types::InvestorProfile;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::Address;

    fn record(env: &Env) -> AccountRecord {
        let profile = InvestorProfile {
            address: Address::generate(env),
            username: String::from_str(env, "maria"),
            referral_code: String::from_str(env, "DEMOREF"),
        };
        AccountRecord::fresh(env, &profile)
    }

    fn receipt(env: &Env) -> Bytes {
        Bytes::from_slice(env, b"receipt-png")
    }

    #[test]
    fn deposit_starts_pending_without_credit() {
        let env = Env::default();
        let mut rec = record(&env);
        let note = String::from_str(&env, "bpi transfer");

        let id = submit_deposit(&env, &mut rec, &receipt(&env), DepositPlan::Vip, note.clone(), 10)
            .unwrap();

        let dep = rec.deposits.get(0).unwrap();
        assert_eq!(id, 0);
        assert_eq!(dep.status, EntryStatus::Pending);
        assert_eq!(dep.approved_amount, 0);
        assert_eq!(dep.plan, DepositPlan::Vip);
        assert_eq!(dep.receipt_hash, env.crypto().sha256(&receipt(&env)).to_bytes());
        assert_eq!(rec.wallet_balance, 0);
        assert_eq!(rec.history.len(), 1);
        assert_eq!(rec.history.get(0).unwrap().action, LogAction::DepositUploaded);
        assert_eq!(rec.history.get(0).unwrap().details, note);
        assert_record_invariants(&rec);
    }

    #[test]
    fn deposit_ids_are_unique_and_sequential() {
        let env = Env::default();
        let mut rec = record(&env);
        let empty = String::from_str(&env, "");
        let a = submit_deposit(&env, &mut rec, &receipt(&env), DepositPlan::General, empty.clone(), 10)
            .unwrap();
        let b = submit_deposit(&env, &mut rec, &receipt(&env), DepositPlan::General, empty, 10)
            .unwrap();
        assert_eq!((a, b), (0, 1));
    }

    #[test]
    fn deposit_without_receipt_is_rejected() {
        let env = Env::default();
        let mut rec = record(&env);
        let err = submit_deposit(
            &env,
            &mut rec,
            &Bytes::new(&env),
            DepositPlan::General,
            String::from_str(&env, ""),
            1,
        )
        .unwrap_err();
        assert_eq!(err, Error::MissingReceipt);
        assert!(rec.deposits.is_empty());
    }

    #[test]
    fn oversized_receipt_is_rejected() {
        let env = Env::default();
        let mut rec = record(&env);
        let big = [7u8; (MAX_RECEIPT_LEN + 1) as usize];
        let err = submit_deposit(
            &env,
            &mut rec,
            &Bytes::from_slice(&env, &big),
            DepositPlan::General,
            String::from_str(&env, ""),
            1,
        )
        .unwrap_err();
        assert_eq!(err, Error::FieldTooLong);
    }

    #[test]
    fn activate_requires_wallet_credit() {
        let env = Env::default();
        let mut rec = record(&env);
        let err = activate_plan(&env, &mut rec, Plan::Basic, 5_000 * CENTS, 1).unwrap_err();
        assert_eq!(err, Error::NoWalletCredit);
    }

    #[test]
    fn activate_checks_range_then_funds() {
        let env = Env::default();
        let mut rec = record(&env);
        rec.wallet_balance = 20_000 * CENTS;

        assert_eq!(
            activate_plan(&env, &mut rec, Plan::Basic, 0, 1),
            Err(Error::InvalidAmount)
        );
        assert_eq!(
            activate_plan(&env, &mut rec, Plan::Basic, 2_499 * CENTS, 1),
            Err(Error::AmountOutOfRange)
        );
        assert_eq!(
            activate_plan(&env, &mut rec, Plan::Premium, 30_000 * CENTS, 1),
            Err(Error::InsufficientBalance)
        );
        assert_eq!(rec.wallet_balance, 20_000 * CENTS);
        assert!(rec.history.is_empty());
    }

    #[test]
    fn plan_bounds_are_inclusive() {
        let env = Env::default();
        let mut rec = record(&env);
        rec.wallet_balance = 300_000 * CENTS;

        activate_plan(&env, &mut rec, Plan::Basic, 2_500 * CENTS, 1).unwrap();
        activate_plan(&env, &mut rec, Plan::Vip, 250_000 * CENTS, 2).unwrap();

        assert_eq!(rec.wallet_balance, 47_500 * CENTS);
        assert_eq!(rec.total_staked, 252_500 * CENTS);
        assert_eq!(rec.stats.active_plans, 2);
        assert_eq!(rec.history.get(1).unwrap().action, LogAction::Staked(Plan::Vip));
    }

    #[test]
    fn repeated_activation_deducts_each_time() {
        let env = Env::default();
        let mut rec = record(&env);
        rec.wallet_balance = 10_000 * CENTS;

        activate_plan(&env, &mut rec, Plan::Basic, 3_000 * CENTS, 1).unwrap();
        activate_plan(&env, &mut rec, Plan::Basic, 3_000 * CENTS, 1).unwrap();

        assert_eq!(rec.wallet_balance, 4_000 * CENTS);
        assert_eq!(rec.total_staked, 6_000 * CENTS);
        assert_eq!(rec.history.len(), 2);
    }

    #[test]
    fn withdrawal_drains_wallet_then_referral() {
        let env = Env::default();
        let mut rec = record(&env);
        rec.wallet_balance = 1_000 * CENTS;
        rec.referral.balance = 500 * CENTS;

        let id = submit_withdrawal(
            &mut rec,
            PayoutMethod::GCash,
            String::from_str(&env, "09171234567"),
            1_200 * CENTS,
            5,
        )
        .unwrap();

        let w = rec.withdrawals.get(0).unwrap();
        assert_eq!(id, 0);
        assert_eq!(rec.wallet_balance, 0);
        assert_eq!(rec.referral.balance, 300 * CENTS);
        assert_eq!(w.status, EntryStatus::Pending);
        assert_eq!(w.from_wallet, 1_000 * CENTS);
        assert_eq!(w.from_referral, 200 * CENTS);
        assert_record_invariants(&rec);
    }

    #[test]
    fn withdrawal_within_wallet_leaves_referral() {
        let env = Env::default();
        let mut rec = record(&env);
        rec.wallet_balance = 1_000 * CENTS;
        rec.referral.balance = 500 * CENTS;

        submit_withdrawal(&mut rec, PayoutMethod::Btc, String::from_str(&env, "bc1q"), 400 * CENTS, 5)
            .unwrap();

        assert_eq!(rec.wallet_balance, 600 * CENTS);
        assert_eq!(rec.referral.balance, 500 * CENTS);
    }

    #[test]
    fn withdrawal_validation() {
        let env = Env::default();
        let mut rec = record(&env);
        rec.wallet_balance = 100 * CENTS;
        let acct = String::from_str(&env, "BDO - 0012");

        assert_eq!(
            submit_withdrawal(&mut rec, PayoutMethod::BankTransfer, String::from_str(&env, "   "), CENTS, 1),
            Err(Error::MissingAccount)
        );
        assert_eq!(
            submit_withdrawal(&mut rec, PayoutMethod::BankTransfer, acct.clone(), 0, 1),
            Err(Error::InvalidAmount)
        );
        assert_eq!(
            submit_withdrawal(&mut rec, PayoutMethod::BankTransfer, acct, 101 * CENTS, 1),
            Err(Error::InsufficientBalance)
        );
        assert_eq!(rec.wallet_balance, 100 * CENTS);
        assert!(rec.withdrawals.is_empty());
    }

    #[test]
    fn oversized_account_is_too_long_not_missing() {
        let env = Env::default();
        let mut rec = record(&env);
        rec.wallet_balance = 100 * CENTS;
        let long = String::from_str(&env, &"9".repeat(600));

        assert_eq!(
            submit_withdrawal(&mut rec, PayoutMethod::GCash, long, CENTS, 1),
            Err(Error::FieldTooLong)
        );
    }
}
