//! # Types
//!
//! Shared data structures for the ledger.
//!
//! ## One record per scope
//!
//! All investor and admin state lives in a single [`AccountRecord`]. Every
//! operation reads it whole, mutates it in memory and writes it back whole;
//! `version` is bumped on each save so whole-record writers can detect
//! that they started from a stale copy.
//!
//! ## Status as a Finite-State Machine
//!
//! Deposits and withdrawals share [`EntryStatus`]:
//!
//! ```text
//! Pending ──► Approved
//!    └──────► Rejected
//! ```
//!
//! Both `Approved` and `Rejected` are terminal.

use soroban_sdk::{contracttype, Address, BytesN, Env, String, Vec};

use crate::constants::{
    BASIC_MAX, BASIC_MIN, DEFAULT_INVESTORS, MAX_TEXT_LEN, PREMIUM_MAX, PREMIUM_MIN, VIP_MAX,
    VIP_MIN,
};
use crate::text::MAX_DETAILS_LEN;
use crate::Error;

/// Review state of a deposit or withdrawal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryStatus {
    /// Submitted by the investor, awaiting admin review.
    Pending,
    /// Accepted by an admin. Terminal.
    Approved,
    /// Declined by an admin. Terminal.
    Rejected,
}

/// Staking tier with a fixed inclusive contribution range.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Plan {
    Basic,
    Premium,
    Vip,
}

impl Plan {
    /// Inclusive `(min, max)` stake for this plan, in minor units.
    pub fn range(self) -> (i128, i128) {
        match self {
            Plan::Basic => (BASIC_MIN, BASIC_MAX),
            Plan::Premium => (PREMIUM_MIN, PREMIUM_MAX),
            Plan::Vip => (VIP_MIN, VIP_MAX),
        }
    }

    pub fn accepts(self, amount: i128) -> bool {
        let (min, max) = self.range();
        amount >= min && amount <= max
    }

    pub fn name(self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Premium => "Premium",
            Plan::Vip => "VIP",
        }
    }
}

/// Plan tagged on a deposit. `General` means the investor picked none.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DepositPlan {
    General,
    Basic,
    Premium,
    Vip,
}

impl DepositPlan {
    pub fn plan(self) -> Option<Plan> {
        match self {
            DepositPlan::General => None,
            DepositPlan::Basic => Some(Plan::Basic),
            DepositPlan::Premium => Some(Plan::Premium),
            DepositPlan::Vip => Some(Plan::Vip),
        }
    }
}

/// Payout rail chosen for a withdrawal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PayoutMethod {
    GCash,
    BankTransfer,
    Usdt,
    Btc,
    Other,
}

impl PayoutMethod {
    pub fn label(self) -> &'static str {
        match self {
            PayoutMethod::GCash => "GCash",
            PayoutMethod::BankTransfer => "Bank Transfer",
            PayoutMethod::Usdt => "USDT (Binance)",
            PayoutMethod::Btc => "BTC Wallet",
            PayoutMethod::Other => "Other",
        }
    }
}

/// Investor identity bound to this contract at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestorProfile {
    pub address: Address,
    pub username: String,
    pub referral_code: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserProfile {
    pub username: String,
}

/// A receipt upload awaiting (or past) admin review.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub id: u64,
    /// SHA-256 of the uploaded receipt. The payload itself is kept under
    /// its own storage key.
    pub receipt_hash: BytesN<32>,
    pub plan: DepositPlan,
    pub note: String,
    pub status: EntryStatus,
    pub date: u64,
    /// Amount credited by the admin. Zero unless `status == Approved`.
    pub approved_amount: i128,
    pub approved_at: Option<u64>,
    pub rejected_at: Option<u64>,
}

/// A payout request. Funds are debited when the request is made.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawal {
    pub id: u64,
    pub amount: i128,
    pub method: PayoutMethod,
    pub account: String,
    pub status: EntryStatus,
    pub date: u64,
    pub approved_at: Option<u64>,
    pub rejected_at: Option<u64>,
    /// Part of `amount` taken from the wallet balance.
    pub from_wallet: i128,
    /// Part of `amount` taken from the referral balance.
    pub from_referral: i128,
}

/// What a log entry records.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LogAction {
    DepositUploaded,
    DepositApproved,
    DepositRejected,
    AutoApproved,
    AutoRejected,
    Staked(Plan),
    WithdrawalRequested,
    WithdrawalApproved,
    WithdrawalRejected,
    ManualCredit,
    ReferralCredited,
    ReferralRegistered,
    RecordImported,
}

impl LogAction {
    /// Stable tag used in exports.
    pub fn tag(&self) -> &'static str {
        match self {
            LogAction::DepositUploaded => "deposit_uploaded",
            LogAction::DepositApproved => "approve_deposit",
            LogAction::DepositRejected => "reject_deposit",
            LogAction::AutoApproved => "auto_approve",
            LogAction::AutoRejected => "auto_reject",
            LogAction::Staked(Plan::Basic) => "staked_basic",
            LogAction::Staked(Plan::Premium) => "staked_premium",
            LogAction::Staked(Plan::Vip) => "staked_vip",
            LogAction::WithdrawalRequested => "withdrawal_request",
            LogAction::WithdrawalApproved => "approve_withdrawal",
            LogAction::WithdrawalRejected => "reject_withdrawal",
            LogAction::ManualCredit => "manual_credit",
            LogAction::ReferralCredited => "referral_credit",
            LogAction::ReferralRegistered => "referral_signup",
            LogAction::RecordImported => "import_record",
        }
    }
}

/// Immutable audit entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogEntry {
    pub id: u64,
    pub action: LogAction,
    /// Deposit or withdrawal id the action applies to.
    pub subject: Option<u64>,
    pub amount: Option<i128>,
    /// Free text: deposit note, credited user, etc.
    pub details: String,
    pub date: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralStats {
    pub code: String,
    pub balance: i128,
    pub total_commission: i128,
    pub total_referrals: u32,
    pub active_referrals: u32,
    pub deposit_value: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stats {
    pub investors: u32,
    pub active_plans: u32,
    pub payouts: u32,
}

/// Next id to hand out for each entity kind.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdCounters {
    pub deposit: u64,
    pub withdrawal: u64,
    pub log: u64,
}

/// The single aggregate holding all investor and admin state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountRecord {
    /// Sequence token, bumped on every save.
    pub version: u64,
    pub user: UserProfile,
    pub wallet_balance: i128,
    pub total_staked: i128,
    pub pending_rewards: i128,
    pub deposits: Vec<Deposit>,
    pub withdrawals: Vec<Withdrawal>,
    pub history: Vec<LogEntry>,
    pub referral: ReferralStats,
    pub stats: Stats,
    pub next_ids: IdCounters,
}

impl AccountRecord {
    /// A fresh record for `profile`: zero balances, nothing submitted yet.
    pub fn fresh(env: &Env, profile: &InvestorProfile) -> Self {
        AccountRecord {
            version: 0,
            user: UserProfile {
                username: profile.username.clone(),
            },
            wallet_balance: 0,
            total_staked: 0,
            pending_rewards: 0,
            deposits: Vec::new(env),
            withdrawals: Vec::new(env),
            history: Vec::new(env),
            referral: ReferralStats {
                code: profile.referral_code.clone(),
                balance: 0,
                total_commission: 0,
                total_referrals: 0,
                active_referrals: 0,
                deposit_value: 0,
            },
            stats: Stats {
                investors: DEFAULT_INVESTORS,
                active_plans: 0,
                payouts: 0,
            },
            next_ids: IdCounters {
                deposit: 0,
                withdrawal: 0,
                log: 0,
            },
        }
    }

    /// Money the investor can withdraw right now.
    pub fn available_balance(&self) -> i128 {
        self.wallet_balance.saturating_add(self.referral.balance)
    }

    /// Structural checks applied to a record supplied from outside
    /// (whole-record import). Returns `Error::MalformedRecord` on the first
    /// violation.
    pub fn validate(&self) -> Result<(), Error> {
        let amounts = [
            self.wallet_balance,
            self.total_staked,
            self.pending_rewards,
            self.referral.balance,
            self.referral.total_commission,
            self.referral.deposit_value,
        ];
        if amounts.iter().any(|a| *a < 0) {
            return Err(Error::MalformedRecord);
        }
        if self.referral.active_referrals > self.referral.total_referrals {
            return Err(Error::MalformedRecord);
        }
        check_text(&self.user.username)?;
        check_text(&self.referral.code)?;

        let mut prev: Option<u64> = None;
        for deposit in self.deposits.iter() {
            check_ascending(&mut prev, deposit.id, self.next_ids.deposit)?;
            check_text(&deposit.note)?;
            if deposit.approved_amount < 0 {
                return Err(Error::MalformedRecord);
            }
            if deposit.status != EntryStatus::Approved && deposit.approved_amount != 0 {
                return Err(Error::MalformedRecord);
            }
        }

        let mut prev: Option<u64> = None;
        for withdrawal in self.withdrawals.iter() {
            check_ascending(&mut prev, withdrawal.id, self.next_ids.withdrawal)?;
            check_text(&withdrawal.account)?;
            if withdrawal.amount <= 0
                || withdrawal.from_wallet < 0
                || withdrawal.from_referral < 0
                || withdrawal.from_wallet.checked_add(withdrawal.from_referral)
                    != Some(withdrawal.amount)
            {
                return Err(Error::MalformedRecord);
            }
        }

        let mut prev: Option<u64> = None;
        for entry in self.history.iter() {
            check_ascending(&mut prev, entry.id, self.next_ids.log)?;
            if entry.details.len() as usize > MAX_DETAILS_LEN {
                return Err(Error::MalformedRecord);
            }
        }
        Ok(())
    }
}

fn check_text(text: &String) -> Result<(), Error> {
    if text.len() as usize > MAX_TEXT_LEN {
        return Err(Error::MalformedRecord);
    }
    Ok(())
}

/// Ids must be strictly increasing and below the record's next-id counter.
fn check_ascending(prev: &mut Option<u64>, id: u64, next: u64) -> Result<(), Error> {
    if id >= next {
        return Err(Error::MalformedRecord);
    }
    if let Some(p) = *prev {
        if id <= p {
            return Err(Error::MalformedRecord);
        }
    }
    *prev = Some(id);
    Ok(())
}

/// Dashboard figures for the admin console.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminOverview {
    pub investors: u32,
    /// Sum of `approved_amount` over approved deposits.
    pub total_approved: i128,
    pub total_staked: i128,
    pub wallet_balance: i128,
    pub pending_deposits: u32,
    pub pending_withdrawals: u32,
}

/// One match returned by `search`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchHit {
    Deposit(Deposit),
    Withdrawal(Withdrawal),
}
