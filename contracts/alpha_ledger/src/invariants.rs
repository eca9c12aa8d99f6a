#![allow(dead_code)]

extern crate std;

use crate::types::{AccountRecord, EntryStatus};

/// Balances and referral figures are never negative.
pub fn assert_amounts_non_negative(record: &AccountRecord) {
    assert!(record.wallet_balance >= 0, "wallet went negative: {}", record.wallet_balance);
    assert!(record.total_staked >= 0, "staked went negative: {}", record.total_staked);
    assert!(
        record.referral.balance >= 0,
        "referral balance went negative: {}",
        record.referral.balance
    );
    assert!(
        record.referral.active_referrals <= record.referral.total_referrals,
        "active referrals {} exceed total {}",
        record.referral.active_referrals,
        record.referral.total_referrals
    );
}

/// Only approved deposits carry a credited amount.
pub fn assert_approved_amounts(record: &AccountRecord) {
    for deposit in record.deposits.iter() {
        if deposit.status != EntryStatus::Approved {
            assert_eq!(
                deposit.approved_amount, 0,
                "deposit {} is {:?} but carries amount {}",
                deposit.id, deposit.status, deposit.approved_amount
            );
            assert!(deposit.approved_at.is_none(), "deposit {} has approved_at", deposit.id);
        }
        if deposit.status != EntryStatus::Rejected {
            assert!(deposit.rejected_at.is_none(), "deposit {} has rejected_at", deposit.id);
        }
    }
}

/// Every withdrawal's wallet/referral split adds up to its amount.
pub fn assert_withdrawal_split(record: &AccountRecord) {
    for w in record.withdrawals.iter() {
        assert!(w.amount > 0, "withdrawal {} has amount {}", w.id, w.amount);
        assert_eq!(
            w.from_wallet + w.from_referral,
            w.amount,
            "withdrawal {} split {} + {} != {}",
            w.id,
            w.from_wallet,
            w.from_referral,
            w.amount
        );
    }
}

/// Ids are strictly increasing and below the next-id counters.
pub fn assert_ids_ordered(record: &AccountRecord) {
    let deposit_ids: std::vec::Vec<u64> = record.deposits.iter().map(|d| d.id).collect();
    let withdrawal_ids: std::vec::Vec<u64> = record.withdrawals.iter().map(|w| w.id).collect();
    let log_ids: std::vec::Vec<u64> = record.history.iter().map(|e| e.id).collect();

    for (ids, next, what) in [
        (deposit_ids, record.next_ids.deposit, "deposit"),
        (withdrawal_ids, record.next_ids.withdrawal, "withdrawal"),
        (log_ids, record.next_ids.log, "log"),
    ] {
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} ids out of order: {:?}", what, pair);
        }
        if let Some(last) = ids.last() {
            assert!(*last < next, "{} id {} not below counter {}", what, last, next);
        }
    }
}

/// A review moves an entry out of `Pending` and never back.
pub fn assert_valid_status_transition(from: EntryStatus, to: EntryStatus) {
    let valid = matches!(
        (from, to),
        (EntryStatus::Pending, EntryStatus::Approved) | (EntryStatus::Pending, EntryStatus::Rejected)
    );
    assert!(valid, "invalid status transition from {:?} to {:?}", from, to);
}

/// Run all stateless record invariants.
pub fn assert_record_invariants(record: &AccountRecord) {
    assert_amounts_non_negative(record);
    assert_approved_amounts(record);
    assert_withdrawal_split(record);
    assert_ids_ordered(record);
    assert_eq!(record.validate(), Ok(()), "record fails its own validation");
}
