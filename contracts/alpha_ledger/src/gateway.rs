//! # Gateways
//!
//! The workflow never touches contract storage or the event stream
//! directly. It goes through two seams:
//!
//! - [`PersistenceGateway`] loads and saves the whole [`AccountRecord`].
//! - [`NotificationSink`] receives one [`Notification`] per state change.
//!
//! [`LedgerGateway`] implements both over the contract's own storage and
//! events. Tests swap in in-memory implementations.

use soroban_sdk::{Env, String};

use crate::events;
use crate::storage;
use crate::types::{AccountRecord, DepositPlan, EntryStatus, PayoutMethod, Plan};
use crate::Error;

pub trait PersistenceGateway {
    /// `Ok(None)` if nothing is stored; `Err(Error::MalformedRecord)` if the
    /// stored document cannot be decoded.
    fn load(&self) -> Result<Option<AccountRecord>, Error>;

    fn save(&self, record: &AccountRecord);
}

pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

/// Something an operator or integration should hear about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notification {
    DepositSubmitted {
        deposit_id: u64,
        plan: DepositPlan,
    },
    DepositReviewed {
        deposit_id: u64,
        status: EntryStatus,
        amount: i128,
    },
    BulkReviewed {
        status: EntryStatus,
        count: u32,
    },
    PlanActivated {
        plan: Plan,
        amount: i128,
        wallet_balance: i128,
    },
    WithdrawalRequested {
        withdrawal_id: u64,
        amount: i128,
        method: PayoutMethod,
    },
    WithdrawalReviewed {
        withdrawal_id: u64,
        status: EntryStatus,
        amount: i128,
    },
    ManualCredited {
        user: String,
        amount: i128,
    },
    ReferralUpdated {
        balance: i128,
        total_referrals: u32,
    },
    LogCleared {
        removed: u32,
    },
    RecordReset,
    RecordImported {
        version: u64,
    },
}

/// Storage- and event-backed gateway used by the contract entry points.
pub struct LedgerGateway<'a> {
    env: &'a Env,
}

impl<'a> LedgerGateway<'a> {
    pub fn new(env: &'a Env) -> Self {
        LedgerGateway { env }
    }
}

impl PersistenceGateway for LedgerGateway<'_> {
    fn load(&self) -> Result<Option<AccountRecord>, Error> {
        storage::load_record(self.env)
    }

    fn save(&self, record: &AccountRecord) {
        storage::save_record(self.env, record);
    }
}

impl NotificationSink for LedgerGateway<'_> {
    fn notify(&self, notification: Notification) {
        let env = self.env;
        match notification {
            Notification::DepositSubmitted { deposit_id, plan } => {
                events::emit_deposit_submitted(env, deposit_id, plan)
            }
            Notification::DepositReviewed {
                deposit_id,
                status,
                amount,
            } => events::emit_deposit_reviewed(env, deposit_id, status, amount),
            Notification::BulkReviewed { status, count } => {
                events::emit_bulk_reviewed(env, status, count)
            }
            Notification::PlanActivated {
                plan,
                amount,
                wallet_balance,
            } => events::emit_plan_activated(env, plan, amount, wallet_balance),
            Notification::WithdrawalRequested {
                withdrawal_id,
                amount,
                method,
            } => events::emit_withdrawal_requested(env, withdrawal_id, amount, method),
            Notification::WithdrawalReviewed {
                withdrawal_id,
                status,
                amount,
            } => events::emit_withdrawal_reviewed(env, withdrawal_id, status, amount),
            Notification::ManualCredited { user, amount } => {
                events::emit_manual_credited(env, user, amount)
            }
            Notification::ReferralUpdated {
                balance,
                total_referrals,
            } => events::emit_referral_updated(env, balance, total_referrals),
            Notification::LogCleared { removed } => events::emit_log_cleared(env, removed),
            Notification::RecordReset => events::emit_record_reset(env),
            Notification::RecordImported { version } => events::emit_record_imported(env, version),
        }
    }
}
