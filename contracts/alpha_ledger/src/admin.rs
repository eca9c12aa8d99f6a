//! # Admin workflow
//!
//! Review and maintenance transitions. Like [`crate::investor`], these only
//! touch the in-memory record; authorization happens at the entry points.
//!
//! Deposits and withdrawals leave `Pending` exactly once. Reviewing an entry
//! that is already `Approved` or `Rejected` fails with
//! `Error::AlreadyFinalized` and changes nothing.
//!
//! Rejecting a withdrawal refunds the whole amount into the wallet balance,
//! including any part that was drawn from the referral balance. The split is
//! kept on the withdrawal (`from_wallet` / `from_referral`) for reference.

use soroban_sdk::{Env, String};

use crate::activity;
use crate::text;
use crate::types::{AccountRecord, Deposit, EntryStatus, LogAction, ReferralStats, Withdrawal};
use crate::Error;

fn find_deposit(record: &AccountRecord, id: u64) -> Result<(u32, Deposit), Error> {
    for (i, deposit) in record.deposits.iter().enumerate() {
        if deposit.id == id {
            return Ok((i as u32, deposit));
        }
    }
    Err(Error::DepositNotFound)
}

fn find_withdrawal(record: &AccountRecord, id: u64) -> Result<(u32, Withdrawal), Error> {
    for (i, withdrawal) in record.withdrawals.iter().enumerate() {
        if withdrawal.id == id {
            return Ok((i as u32, withdrawal));
        }
    }
    Err(Error::WithdrawalNotFound)
}

fn credit_wallet(record: &mut AccountRecord, amount: i128) -> Result<(), Error> {
    record.wallet_balance = record
        .wallet_balance
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Deposits
// ─────────────────────────────────────────────────────────

/// Approve a pending deposit and credit `amount` to the wallet. The amount is
/// the admin's figure; nothing the investor declared is trusted.
/// Returns the new wallet balance.
pub fn approve_deposit(
    record: &mut AccountRecord,
    id: u64,
    amount: i128,
    now: u64,
) -> Result<i128, Error> {
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    let (index, mut deposit) = find_deposit(record, id)?;
    if deposit.status != EntryStatus::Pending {
        return Err(Error::AlreadyFinalized);
    }

    deposit.status = EntryStatus::Approved;
    deposit.approved_amount = amount;
    deposit.approved_at = Some(now);
    let note = deposit.note.clone();
    record.deposits.set(index, deposit);
    credit_wallet(record, amount)?;

    activity::append(record, LogAction::DepositApproved, Some(id), Some(amount), note, now)?;
    Ok(record.wallet_balance)
}

pub fn reject_deposit(record: &mut AccountRecord, id: u64, now: u64) -> Result<(), Error> {
    let (index, mut deposit) = find_deposit(record, id)?;
    if deposit.status != EntryStatus::Pending {
        return Err(Error::AlreadyFinalized);
    }

    deposit.status = EntryStatus::Rejected;
    deposit.rejected_at = Some(now);
    let note = deposit.note.clone();
    record.deposits.set(index, deposit);

    activity::append(record, LogAction::DepositRejected, Some(id), None, note, now)?;
    Ok(())
}

/// Approve every pending deposit with `approved_amount = 0`. Credits nothing;
/// amounts have to be corrected per deposit afterwards. Returns the count.
pub fn bulk_approve_pending(record: &mut AccountRecord, now: u64) -> Result<u32, Error> {
    bulk_review(record, EntryStatus::Approved, now)
}

/// Reject every pending deposit. Returns the count.
pub fn bulk_reject_pending(record: &mut AccountRecord, now: u64) -> Result<u32, Error> {
    bulk_review(record, EntryStatus::Rejected, now)
}

fn bulk_review(record: &mut AccountRecord, outcome: EntryStatus, now: u64) -> Result<u32, Error> {
    let mut count = 0u32;
    for index in 0..record.deposits.len() {
        let Some(mut deposit) = record.deposits.get(index) else {
            continue;
        };
        if deposit.status != EntryStatus::Pending {
            continue;
        }
        let action = match outcome {
            EntryStatus::Approved => {
                deposit.approved_amount = 0;
                deposit.approved_at = Some(now);
                LogAction::AutoApproved
            }
            _ => {
                deposit.rejected_at = Some(now);
                LogAction::AutoRejected
            }
        };
        deposit.status = outcome;
        let id = deposit.id;
        let note = deposit.note.clone();
        record.deposits.set(index, deposit);

        let amount = (outcome == EntryStatus::Approved).then_some(0);
        activity::append(record, action, Some(id), amount, note, now)?;
        count += 1;
    }
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Withdrawals
// ─────────────────────────────────────────────────────────

/// Mark a withdrawal as paid out. Funds already left at request time, so no
/// balance changes. Returns the paid amount.
pub fn approve_withdrawal(record: &mut AccountRecord, id: u64, now: u64) -> Result<i128, Error> {
    let (index, mut withdrawal) = find_withdrawal(record, id)?;
    if withdrawal.status != EntryStatus::Pending {
        return Err(Error::AlreadyFinalized);
    }

    withdrawal.status = EntryStatus::Approved;
    withdrawal.approved_at = Some(now);
    let amount = withdrawal.amount;
    let account = withdrawal.account.clone();
    record.withdrawals.set(index, withdrawal);
    record.stats.payouts = record.stats.payouts.checked_add(1).ok_or(Error::Overflow)?;

    activity::append(record, LogAction::WithdrawalApproved, Some(id), Some(amount), account, now)?;
    Ok(amount)
}

/// Decline a withdrawal and refund its full amount into the wallet.
/// Returns the refunded amount.
pub fn reject_withdrawal(record: &mut AccountRecord, id: u64, now: u64) -> Result<i128, Error> {
    let (index, mut withdrawal) = find_withdrawal(record, id)?;
    if withdrawal.status != EntryStatus::Pending {
        return Err(Error::AlreadyFinalized);
    }

    withdrawal.status = EntryStatus::Rejected;
    withdrawal.rejected_at = Some(now);
    let refund = withdrawal.amount;
    let account = withdrawal.account.clone();
    record.withdrawals.set(index, withdrawal);
    credit_wallet(record, refund)?;

    activity::append(record, LogAction::WithdrawalRejected, Some(id), Some(refund), account, now)?;
    Ok(refund)
}

// ─────────────────────────────────────────────────────────
// Credits and referrals
// ─────────────────────────────────────────────────────────

/// Credit the wallet directly, outside the deposit workflow.
/// Returns the new wallet balance.
pub fn manual_credit(
    env: &Env,
    record: &mut AccountRecord,
    user: String,
    amount: i128,
    note: String,
    now: u64,
) -> Result<i128, Error> {
    text::check_len(&user)?;
    if text::is_blank(&user) {
        return Err(Error::MissingUser);
    }
    text::check_len(&note)?;
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    credit_wallet(record, amount)?;
    let details = text::join(env, &user, " | ", &note);
    activity::append(record, LogAction::ManualCredit, None, Some(amount), details, now)?;
    Ok(record.wallet_balance)
}

/// Credit referral commission.
pub fn credit_referral(
    record: &mut AccountRecord,
    amount: i128,
    note: String,
    now: u64,
) -> Result<ReferralStats, Error> {
    text::check_len(&note)?;
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    let referral = &mut record.referral;
    referral.balance = referral.balance.checked_add(amount).ok_or(Error::Overflow)?;
    referral.total_commission = referral
        .total_commission
        .checked_add(amount)
        .ok_or(Error::Overflow)?;

    activity::append(record, LogAction::ReferralCredited, None, Some(amount), note, now)?;
    Ok(record.referral.clone())
}

/// Count a new referred investor.
pub fn register_referral(
    env: &Env,
    record: &mut AccountRecord,
    deposit_value: i128,
    active: bool,
    now: u64,
) -> Result<ReferralStats, Error> {
    if deposit_value < 0 {
        return Err(Error::InvalidAmount);
    }

    let referral = &mut record.referral;
    referral.total_referrals = referral
        .total_referrals
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    if active {
        referral.active_referrals = referral
            .active_referrals
            .checked_add(1)
            .ok_or(Error::Overflow)?;
    }
    referral.deposit_value = referral
        .deposit_value
        .checked_add(deposit_value)
        .ok_or(Error::Overflow)?;

    let details = String::from_str(env, if active { "active" } else { "inactive" });
    activity::append(
        record,
        LogAction::ReferralRegistered,
        None,
        Some(deposit_value),
        details,
        now,
    )?;
    Ok(record.referral.clone())
}

// ─────────────────────────────────────────────────────────
// Whole-record replacement
// ─────────────────────────────────────────────────────────

/// Replace the record with `candidate` if the stored version still equals
/// `expected_version`. The candidate keeps its own history and counters and
/// gets one `RecordImported` entry appended. Returns the version the record
/// will carry once saved.
pub fn import_record(
    env: &Env,
    record: &mut AccountRecord,
    candidate: AccountRecord,
    expected_version: u64,
    now: u64,
) -> Result<u64, Error> {
    if record.version != expected_version {
        return Err(Error::VersionConflict);
    }
    candidate.validate()?;

    let version = record.version;
    *record = candidate;
    record.version = version;
    activity::append(
        record,
        LogAction::RecordImported,
        None,
        None,
        String::from_str(env, ""),
        now,
    )?;
    version.checked_add(1).ok_or(Error::Overflow)
}
