use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::{DepositPlan, EntryStatus, PayoutMethod, Plan};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositSubmitted {
    pub deposit_id: u64,
    pub plan: DepositPlan,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositReviewed {
    pub deposit_id: u64,
    pub status: EntryStatus,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanActivated {
    pub plan: Plan,
    pub amount: i128,
    pub wallet_balance: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequested {
    pub withdrawal_id: u64,
    pub amount: i128,
    pub method: PayoutMethod,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalReviewed {
    pub withdrawal_id: u64,
    pub status: EntryStatus,
    /// Paid out on approval, refunded to the wallet on rejection.
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BulkReviewed {
    pub status: EntryStatus,
    pub count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManualCredited {
    pub user: String,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralUpdated {
    pub balance: i128,
    pub total_referrals: u32,
}

pub fn emit_deposit_submitted(env: &Env, deposit_id: u64, plan: DepositPlan) {
    let topics = (symbol_short!("dep_sub"), deposit_id);
    env.events().publish(topics, DepositSubmitted { deposit_id, plan });
}

pub fn emit_deposit_reviewed(env: &Env, deposit_id: u64, status: EntryStatus, amount: i128) {
    let topics = (symbol_short!("dep_rev"), deposit_id);
    let data = DepositReviewed {
        deposit_id,
        status,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_bulk_reviewed(env: &Env, status: EntryStatus, count: u32) {
    let topics = (symbol_short!("dep_bulk"),);
    env.events().publish(topics, BulkReviewed { status, count });
}

pub fn emit_plan_activated(env: &Env, plan: Plan, amount: i128, wallet_balance: i128) {
    let topics = (symbol_short!("staked"),);
    let data = PlanActivated {
        plan,
        amount,
        wallet_balance,
    };
    env.events().publish(topics, data);
}

pub fn emit_withdrawal_requested(env: &Env, withdrawal_id: u64, amount: i128, method: PayoutMethod) {
    let topics = (symbol_short!("wd_req"), withdrawal_id);
    let data = WithdrawalRequested {
        withdrawal_id,
        amount,
        method,
    };
    env.events().publish(topics, data);
}

pub fn emit_withdrawal_reviewed(env: &Env, withdrawal_id: u64, status: EntryStatus, amount: i128) {
    let topics = (symbol_short!("wd_rev"), withdrawal_id);
    let data = WithdrawalReviewed {
        withdrawal_id,
        status,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_manual_credited(env: &Env, user: String, amount: i128) {
    let topics = (symbol_short!("credited"),);
    env.events().publish(topics, ManualCredited { user, amount });
}

pub fn emit_referral_updated(env: &Env, balance: i128, total_referrals: u32) {
    let topics = (symbol_short!("referral"),);
    let data = ReferralUpdated {
        balance,
        total_referrals,
    };
    env.events().publish(topics, data);
}

pub fn emit_log_cleared(env: &Env, removed: u32) {
    env.events().publish((symbol_short!("log_clr"),), removed);
}

pub fn emit_record_reset(env: &Env) {
    env.events().publish((symbol_short!("rec_rst"),), ());
}

pub fn emit_record_imported(env: &Env, version: u64) {
    env.events().publish((symbol_short!("rec_imp"),), version);
}

pub fn emit_protocol_paused(env: &Env, by: Address) {
    env.events().publish((symbol_short!("paused"),), by);
}

pub fn emit_protocol_unpaused(env: &Env, by: Address) {
    env.events().publish((symbol_short!("unpaused"),), by);
}
