//! Read-only views over a record snapshot. Nothing here saves.

use soroban_sdk::{Env, String, Vec};

use crate::text::{self, contains_ci, Digits};
use crate::types::{AccountRecord, AdminOverview, Deposit, EntryStatus, SearchHit, Withdrawal};
use crate::Error;

pub fn overview(record: &AccountRecord) -> AdminOverview {
    let mut total_approved: i128 = 0;
    let mut pending_deposits = 0u32;
    for deposit in record.deposits.iter() {
        match deposit.status {
            EntryStatus::Approved => {
                total_approved = total_approved.saturating_add(deposit.approved_amount)
            }
            EntryStatus::Pending => pending_deposits += 1,
            EntryStatus::Rejected => {}
        }
    }
    let pending_withdrawals = record
        .withdrawals
        .iter()
        .filter(|w| w.status == EntryStatus::Pending)
        .count() as u32;

    AdminOverview {
        investors: record.stats.investors,
        total_approved,
        total_staked: record.total_staked,
        wallet_balance: record.wallet_balance,
        pending_deposits,
        pending_withdrawals,
    }
}

fn deposit_matches(deposit: &Deposit, needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if let Some(plan) = deposit.plan.plan() {
        if contains_ci(plan.name().as_bytes(), needle) {
            return true;
        }
    }
    contains_ci(Digits::from_u64(deposit.id).as_bytes(), needle)
        || text::with_bytes(&deposit.note, |note| contains_ci(note, needle))
}

fn withdrawal_matches(withdrawal: &Withdrawal, needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    contains_ci(withdrawal.method.label().as_bytes(), needle)
        || contains_ci(Digits::money(withdrawal.amount).as_bytes(), needle)
        || text::with_bytes(&withdrawal.account, |account| contains_ci(account, needle))
}

fn status_matches(status: EntryStatus, filter: Option<EntryStatus>) -> bool {
    filter.map_or(true, |wanted| wanted == status)
}

/// Deposits newest first, optionally narrowed by status and text.
pub fn deposits(
    env: &Env,
    record: &AccountRecord,
    status: Option<EntryStatus>,
    query: Option<String>,
) -> Result<Vec<Deposit>, Error> {
    let query = query.unwrap_or_else(|| String::from_str(env, ""));
    text::check_len(&query)?;
    Ok(text::with_bytes(&query, |raw| {
        let needle = text::trim(raw);
        let mut out = Vec::new(env);
        for deposit in record.deposits.iter() {
            if status_matches(deposit.status, status) && deposit_matches(&deposit, needle) {
                out.push_front(deposit);
            }
        }
        out
    }))
}

/// Withdrawals newest first, optionally narrowed by status and text.
pub fn withdrawals(
    env: &Env,
    record: &AccountRecord,
    status: Option<EntryStatus>,
    query: Option<String>,
) -> Result<Vec<Withdrawal>, Error> {
    let query = query.unwrap_or_else(|| String::from_str(env, ""));
    text::check_len(&query)?;
    Ok(text::with_bytes(&query, |raw| {
        let needle = text::trim(raw);
        let mut out = Vec::new(env);
        for withdrawal in record.withdrawals.iter() {
            if status_matches(withdrawal.status, status) && withdrawal_matches(&withdrawal, needle) {
                out.push_front(withdrawal);
            }
        }
        out
    }))
}

/// Deposits then withdrawals matching `query`, each in submission order.
pub fn search(env: &Env, record: &AccountRecord, query: String) -> Result<Vec<SearchHit>, Error> {
    text::check_len(&query)?;
    if text::is_blank(&query) {
        return Err(Error::MissingQuery);
    }
    Ok(text::with_bytes(&query, |raw| {
        let needle = text::trim(raw);
        let mut hits = Vec::new(env);
        for deposit in record.deposits.iter() {
            if deposit_matches(&deposit, needle) {
                hits.push_back(SearchHit::Deposit(deposit));
            }
        }
        for withdrawal in record.withdrawals.iter() {
            if withdrawal_matches(&withdrawal, needle) {
                hits.push_back(SearchHit::Withdrawal(withdrawal));
            }
        }
        hits
    }))
}
