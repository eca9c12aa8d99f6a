//! # AlphaProfit Ledger Contract
//!
//! Investor dashboard and admin console over one shared account record.
//! The single Soroban contract `AlphaLedger` exposes:
//!
//! | Side        | Entry Point(s)                                                    |
//! |-------------|-------------------------------------------------------------------|
//! | Bootstrap   | [`AlphaLedger::init`]                                             |
//! | Role admin  | `grant_role`, `revoke_role`, `transfer_super_admin`               |
//! | Investor    | `submit_deposit`, `activate_plan`, `submit_withdrawal`            |
//! | Review      | `approve_deposit`, `reject_deposit`, `bulk_approve_pending`, `bulk_reject_pending`, `approve_withdrawal`, `reject_withdrawal` |
//! | Credits     | `manual_credit`, `credit_referral`, `register_referral`           |
//! | Maintenance | `clear_log`, `import_record`, `pause`, `unpause`                  |
//! | Queries     | `record`, `overview`, `deposits`, `withdrawals`, `receipt`, `search`, `activity`, `export_activity`, `available_balance`, `version` |
//!
//! ## Architecture
//!
//! Authorization is delegated to [`rbac`] (admins) and the investor profile
//! bound at `init`. Every mutation runs through a [`service::Desk`], which
//! loads the record via a [`gateway::PersistenceGateway`], applies one pure
//! transition from `investor` or `admin`, saves, and emits one notification
//! via a [`gateway::NotificationSink`]. This file contains only the entry
//! points.
//!
//! Amounts are `i128` minor units (centavos). Timestamps are ledger seconds.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Bytes, Env, String, Vec};

mod activity;
mod admin;
mod constants;
pub mod events;
mod export;
pub mod gateway;
mod investor;
mod query;
pub mod rbac;
pub mod service;
mod storage;
mod text;
pub mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use constants::{REFERRAL_ALPHABET, REFERRAL_CODE_LEN};
use gateway::{LedgerGateway, Notification};
pub use rbac::Role;
use service::Desk;
pub use types::{
    AccountRecord, AdminOverview, Deposit, DepositPlan, EntryStatus, InvestorProfile, LogAction,
    LogEntry, PayoutMethod, Plan, ReferralStats, SearchHit, Withdrawal,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    MissingReceipt = 4,
    InvalidAmount = 5,
    AmountOutOfRange = 6,
    InsufficientBalance = 7,
    NoWalletCredit = 8,
    MissingAccount = 9,
    MissingUser = 10,
    MissingQuery = 11,
    FieldTooLong = 12,
    DepositNotFound = 13,
    WithdrawalNotFound = 14,
    AlreadyFinalized = 15,
    VersionConflict = 16,
    MalformedRecord = 17,
    NothingToExport = 18,
    Overflow = 19,
    ProtocolPaused = 20,
}

type LedgerDesk<'a> = Desk<'a, LedgerGateway<'a>, LedgerGateway<'a>>;

#[contract]
pub struct AlphaLedger;

#[contractimpl]
impl AlphaLedger {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Bind the investor, seat the first SuperAdmin and write a fresh record.
    ///
    /// `referral_code` is generated from the ledger PRNG when `None`.
    pub fn init(
        env: Env,
        super_admin: Address,
        investor: Address,
        username: String,
        referral_code: Option<String>,
    ) -> Result<(), Error> {
        super_admin.require_auth();
        if storage::has_profile(&env) {
            return Err(Error::AlreadyInitialized);
        }
        text::check_len(&username)?;
        if text::is_blank(&username) {
            return Err(Error::MissingUser);
        }
        let referral_code = match referral_code {
            Some(code) => {
                text::check_len(&code)?;
                code
            }
            None => generate_referral_code(&env),
        };

        rbac::init_super_admin(&env, &super_admin)?;
        let profile = InvestorProfile {
            address: investor,
            username,
            referral_code,
        };
        storage::save_profile(&env, &profile);
        Desk::new(&env, profile, LedgerGateway::new(&env), LedgerGateway::new(&env)).reset();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Grant `role` to `target`. `caller` must hold `SuperAdmin` or `Admin`.
    pub fn grant_role(env: Env, caller: Address, target: Address, role: Role) -> Result<(), Error> {
        caller.require_auth();
        rbac::grant_role(&env, &caller, &target, role)
    }

    pub fn revoke_role(env: Env, caller: Address, target: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::revoke_role(&env, &caller, &target)
    }

    pub fn transfer_super_admin(
        env: Env,
        current_super_admin: Address,
        new_super_admin: Address,
    ) -> Result<(), Error> {
        current_super_admin.require_auth();
        rbac::transfer_super_admin(&env, &current_super_admin, &new_super_admin)
    }

    pub fn role_of(env: Env, address: Address) -> Option<Role> {
        rbac::get_role(&env, &address)
    }

    pub fn has_role(env: Env, address: Address, role: Role) -> bool {
        rbac::has_role(&env, &address, role)
    }

    // ─────────────────────────────────────────────────────────
    // Maintenance switch
    // ─────────────────────────────────────────────────────────

    /// Halt investor requests and admin reviews. Log maintenance, imports and
    /// role management stay available.
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_admin_or_above(&env, &caller)?;
        storage::set_paused(&env, true);
        events::emit_protocol_paused(&env, caller);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_admin_or_above(&env, &caller)?;
        storage::set_paused(&env, false);
        events::emit_protocol_unpaused(&env, caller);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Investor workflow
    // ─────────────────────────────────────────────────────────

    /// Upload a deposit receipt. The deposit waits for admin review and
    /// credits nothing until approved. The record keeps the receipt's hash;
    /// the payload is stored under its own key. Returns the deposit id.
    pub fn submit_deposit(
        env: Env,
        investor: Address,
        receipt: Bytes,
        plan: DepositPlan,
        note: String,
    ) -> Result<u64, Error> {
        let desk = investor_desk(&env, &investor)?;
        let id = desk.apply(|env, record| {
            let id = investor::submit_deposit(env, record, &receipt, plan, note, now(env))?;
            Ok((id, Notification::DepositSubmitted { deposit_id: id, plan }))
        })?;
        storage::save_receipt(&env, id, &receipt);
        Ok(id)
    }

    /// Stake `amount` from the wallet into `plan`. Returns the wallet balance.
    pub fn activate_plan(env: Env, investor: Address, plan: Plan, amount: i128) -> Result<i128, Error> {
        let desk = investor_desk(&env, &investor)?;
        desk.apply(|env, record| {
            let wallet_balance = investor::activate_plan(env, record, plan, amount, now(env))?;
            Ok((
                wallet_balance,
                Notification::PlanActivated {
                    plan,
                    amount,
                    wallet_balance,
                },
            ))
        })
    }

    /// Request a payout; the amount is debited immediately. Returns the
    /// withdrawal id.
    pub fn submit_withdrawal(
        env: Env,
        investor: Address,
        method: PayoutMethod,
        account: String,
        amount: i128,
    ) -> Result<u64, Error> {
        let desk = investor_desk(&env, &investor)?;
        desk.apply(|env, record| {
            let id = investor::submit_withdrawal(record, method, account, amount, now(env))?;
            Ok((
                id,
                Notification::WithdrawalRequested {
                    withdrawal_id: id,
                    amount,
                    method,
                },
            ))
        })
    }

    // ─────────────────────────────────────────────────────────
    // Admin review
    // ─────────────────────────────────────────────────────────

    /// Approve a pending deposit, crediting `amount` to the wallet.
    /// Returns the wallet balance.
    pub fn approve_deposit(env: Env, caller: Address, deposit_id: u64, amount: i128) -> Result<i128, Error> {
        let desk = admin_desk(&env, &caller, true)?;
        desk.apply(|env, record| {
            let balance = admin::approve_deposit(record, deposit_id, amount, now(env))?;
            Ok((
                balance,
                Notification::DepositReviewed {
                    deposit_id,
                    status: EntryStatus::Approved,
                    amount,
                },
            ))
        })
    }

    pub fn reject_deposit(env: Env, caller: Address, deposit_id: u64) -> Result<(), Error> {
        let desk = admin_desk(&env, &caller, true)?;
        desk.apply(|env, record| {
            admin::reject_deposit(record, deposit_id, now(env))?;
            Ok((
                (),
                Notification::DepositReviewed {
                    deposit_id,
                    status: EntryStatus::Rejected,
                    amount: 0,
                },
            ))
        })
    }

    /// Approve every pending deposit at amount 0. Returns how many changed.
    pub fn bulk_approve_pending(env: Env, caller: Address) -> Result<u32, Error> {
        let desk = admin_desk(&env, &caller, true)?;
        desk.apply(|env, record| {
            let count = admin::bulk_approve_pending(record, now(env))?;
            soroban_sdk::log!(env, "bulk approve at amount 0", count);
            Ok((
                count,
                Notification::BulkReviewed {
                    status: EntryStatus::Approved,
                    count,
                },
            ))
        })
    }

    pub fn bulk_reject_pending(env: Env, caller: Address) -> Result<u32, Error> {
        let desk = admin_desk(&env, &caller, true)?;
        desk.apply(|env, record| {
            let count = admin::bulk_reject_pending(record, now(env))?;
            Ok((
                count,
                Notification::BulkReviewed {
                    status: EntryStatus::Rejected,
                    count,
                },
            ))
        })
    }

    /// Mark a withdrawal as paid out. Returns the amount.
    pub fn approve_withdrawal(env: Env, caller: Address, withdrawal_id: u64) -> Result<i128, Error> {
        let desk = admin_desk(&env, &caller, true)?;
        desk.apply(|env, record| {
            let amount = admin::approve_withdrawal(record, withdrawal_id, now(env))?;
            Ok((
                amount,
                Notification::WithdrawalReviewed {
                    withdrawal_id,
                    status: EntryStatus::Approved,
                    amount,
                },
            ))
        })
    }

    /// Reject a withdrawal and refund it into the wallet. Returns the refund.
    pub fn reject_withdrawal(env: Env, caller: Address, withdrawal_id: u64) -> Result<i128, Error> {
        let desk = admin_desk(&env, &caller, true)?;
        desk.apply(|env, record| {
            let refunded = admin::reject_withdrawal(record, withdrawal_id, now(env))?;
            Ok((
                refunded,
                Notification::WithdrawalReviewed {
                    withdrawal_id,
                    status: EntryStatus::Rejected,
                    amount: refunded,
                },
            ))
        })
    }

    // ─────────────────────────────────────────────────────────
    // Credits
    // ─────────────────────────────────────────────────────────

    /// Credit the wallet directly. Returns the wallet balance.
    pub fn manual_credit(
        env: Env,
        caller: Address,
        user: String,
        amount: i128,
        note: String,
    ) -> Result<i128, Error> {
        let desk = admin_desk(&env, &caller, true)?;
        desk.apply(|env, record| {
            let balance = admin::manual_credit(env, record, user.clone(), amount, note, now(env))?;
            Ok((balance, Notification::ManualCredited { user, amount }))
        })
    }

    pub fn credit_referral(
        env: Env,
        caller: Address,
        amount: i128,
        note: String,
    ) -> Result<ReferralStats, Error> {
        let desk = admin_desk(&env, &caller, true)?;
        desk.apply(|env, record| {
            let stats = admin::credit_referral(record, amount, note, now(env))?;
            let notification = Notification::ReferralUpdated {
                balance: stats.balance,
                total_referrals: stats.total_referrals,
            };
            Ok((stats, notification))
        })
    }

    pub fn register_referral(
        env: Env,
        caller: Address,
        deposit_value: i128,
        active: bool,
    ) -> Result<ReferralStats, Error> {
        let desk = admin_desk(&env, &caller, true)?;
        desk.apply(|env, record| {
            let stats = admin::register_referral(env, record, deposit_value, active, now(env))?;
            let notification = Notification::ReferralUpdated {
                balance: stats.balance,
                total_referrals: stats.total_referrals,
            };
            Ok((stats, notification))
        })
    }

    // ─────────────────────────────────────────────────────────
    // Maintenance
    // ─────────────────────────────────────────────────────────

    /// Drop the whole activity log. Returns how many entries were removed.
    pub fn clear_log(env: Env, caller: Address) -> Result<u32, Error> {
        let desk = admin_desk(&env, &caller, false)?;
        desk.apply(|env, record| {
            let removed = activity::clear(env, record);
            Ok((removed, Notification::LogCleared { removed }))
        })
    }

    /// Replace the whole record, compare-and-swap on `expected_version`.
    /// Returns the new version.
    pub fn import_record(
        env: Env,
        caller: Address,
        record: AccountRecord,
        expected_version: u64,
    ) -> Result<u64, Error> {
        let desk = admin_desk(&env, &caller, false)?;
        desk.apply(|env, current| {
            let version = admin::import_record(env, current, record, expected_version, now(env))?;
            Ok((version, Notification::RecordImported { version }))
        })
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn profile(env: Env) -> Result<InvestorProfile, Error> {
        storage::load_profile(&env)
    }

    pub fn record(env: Env) -> Result<AccountRecord, Error> {
        desk(&env)?.snapshot()
    }

    pub fn version(env: Env) -> Result<u64, Error> {
        Ok(desk(&env)?.snapshot()?.version)
    }

    pub fn overview(env: Env) -> Result<AdminOverview, Error> {
        Ok(query::overview(&desk(&env)?.snapshot()?))
    }

    /// Wallet plus referral balance.
    pub fn available_balance(env: Env) -> Result<i128, Error> {
        Ok(desk(&env)?.snapshot()?.available_balance())
    }

    /// Deposits newest first, filtered by status and/or text.
    pub fn deposits(
        env: Env,
        status: Option<EntryStatus>,
        query: Option<String>,
    ) -> Result<Vec<Deposit>, Error> {
        let record = desk(&env)?.snapshot()?;
        query::deposits(&env, &record, status, query)
    }

    pub fn withdrawals(
        env: Env,
        status: Option<EntryStatus>,
        query: Option<String>,
    ) -> Result<Vec<Withdrawal>, Error> {
        let record = desk(&env)?.snapshot()?;
        query::withdrawals(&env, &record, status, query)
    }

    /// Receipt payload uploaded with a deposit.
    pub fn receipt(env: Env, deposit_id: u64) -> Result<Bytes, Error> {
        storage::load_receipt(&env, deposit_id).ok_or(Error::DepositNotFound)
    }

    pub fn search(env: Env, query: String) -> Result<Vec<SearchHit>, Error> {
        let record = desk(&env)?.snapshot()?;
        query::search(&env, &record, query)
    }

    /// Activity log, newest first.
    pub fn activity(env: Env) -> Result<Vec<LogEntry>, Error> {
        let record = desk(&env)?.snapshot()?;
        Ok(activity::newest_first(&env, &record))
    }

    /// Activity log as CSV bytes (`Date,Action,Details`).
    pub fn export_activity(env: Env) -> Result<Bytes, Error> {
        let record = desk(&env)?.snapshot()?;
        export::activity_csv(&env, &record)
    }
}

// ─────────────────────────────────────────────────────────
// Internal Helpers
// ─────────────────────────────────────────────────────────

fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

fn desk(env: &Env) -> Result<LedgerDesk<'_>, Error> {
    let profile = storage::load_profile(env)?;
    Ok(Desk::new(env, profile, LedgerGateway::new(env), LedgerGateway::new(env)))
}

fn require_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        return Err(Error::ProtocolPaused);
    }
    Ok(())
}

fn investor_desk<'a>(env: &'a Env, investor: &Address) -> Result<LedgerDesk<'a>, Error> {
    require_not_paused(env)?;
    investor.require_auth();
    let desk = desk(env)?;
    if desk.profile().address != *investor {
        return Err(Error::NotAuthorized);
    }
    Ok(desk)
}

fn admin_desk<'a>(env: &'a Env, caller: &Address, pausable: bool) -> Result<LedgerDesk<'a>, Error> {
    if pausable {
        require_not_paused(env)?;
    }
    caller.require_auth();
    rbac::require_admin_or_above(env, caller)?;
    desk(env)
}

fn generate_referral_code(env: &Env) -> String {
    let mut code = [0u8; REFERRAL_CODE_LEN];
    for slot in code.iter_mut() {
        let i: u64 = env.prng().gen_range(0..REFERRAL_ALPHABET.len() as u64);
        *slot = REFERRAL_ALPHABET[i as usize];
    }
    text::from_ascii(env, &code)
}
