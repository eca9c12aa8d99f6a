//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the ledger.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key        | Type              | Description                          |
//! |------------|-------------------|--------------------------------------|
//! | `Profile`  | `InvestorProfile` | Investor bound at `init`             |
//! | `Paused`   | `bool`            | Maintenance switch                   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key      | Type            | Description                          |
//! |----------|-----------------|--------------------------------------|
//! | `Record` | `AccountRecord` | The whole ledger, one document       |
//! | `Receipt(id)` | `Bytes`    | Receipt payload of deposit `id`      |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! The record is read as a raw `Val` and its shape is checked before decoding.
//! The host traps, rather than returning an error, when a struct map carries
//! the wrong keys, so a value written with an older layout has to be caught
//! here and reported as `Error::MalformedRecord`.

use soroban_sdk::{contracttype, Bytes, Env, IntoVal, Map, Symbol, TryFromVal, Val, Vec};

use crate::types::{AccountRecord, InvestorProfile};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Investor profile (Instance).
    Profile,
    /// Maintenance switch (Instance).
    Paused,
    /// The account record (Persistent).
    Record,
    /// Receipt payload per deposit id (Persistent).
    Receipt(u64),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ─────────────────────────────────────────────────────────
// Investor profile
// ─────────────────────────────────────────────────────────

pub fn has_profile(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Profile)
}

pub fn save_profile(env: &Env, profile: &InvestorProfile) {
    env.storage().instance().set(&DataKey::Profile, profile);
    bump_instance(env);
}

pub fn load_profile(env: &Env) -> Result<InvestorProfile, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Profile)
        .ok_or(Error::NotInitialized)
}

// ─────────────────────────────────────────────────────────
// Pause switch
// ─────────────────────────────────────────────────────────

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
    bump_instance(env);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

// ─────────────────────────────────────────────────────────
// Account record
// ─────────────────────────────────────────────────────────

/// Load the record. `Ok(None)` when nothing has been stored yet,
/// `Err(MalformedRecord)` when the stored value does not decode.
pub fn load_record(env: &Env) -> Result<Option<AccountRecord>, Error> {
    let key = DataKey::Record;
    let raw: Option<Val> = env.storage().persistent().get(&key);
    let Some(raw) = raw else {
        return Ok(None);
    };
    bump_persistent(env, &key);
    check_record_shape(env, &raw)?;
    AccountRecord::try_from_val(env, &raw)
        .map(Some)
        .map_err(|_| Error::MalformedRecord)
}

/// Overwrite the whole record.
pub fn save_record(env: &Env, record: &AccountRecord) {
    let key = DataKey::Record;
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

// ─────────────────────────────────────────────────────────
// Receipts
// ─────────────────────────────────────────────────────────

pub fn save_receipt(env: &Env, deposit_id: u64, receipt: &Bytes) {
    let key = DataKey::Receipt(deposit_id);
    env.storage().persistent().set(&key, receipt);
    bump_persistent(env, &key);
}

pub fn load_receipt(env: &Env, deposit_id: u64) -> Option<Bytes> {
    let key = DataKey::Receipt(deposit_id);
    let receipt = env.storage().persistent().get(&key);
    if receipt.is_some() {
        bump_persistent(env, &key);
    }
    receipt
}

// ─────────────────────────────────────────────────────────
// Record shape
// ─────────────────────────────────────────────────────────

// Field names of every struct nested in `AccountRecord`. Keep in step with
// `types.rs`.
const RECORD_FIELDS: &[&str] = &[
    "deposits",
    "history",
    "next_ids",
    "pending_rewards",
    "referral",
    "stats",
    "total_staked",
    "user",
    "version",
    "wallet_balance",
    "withdrawals",
];
const USER_FIELDS: &[&str] = &["username"];
const REFERRAL_FIELDS: &[&str] = &[
    "active_referrals",
    "balance",
    "code",
    "deposit_value",
    "total_commission",
    "total_referrals",
];
const STATS_FIELDS: &[&str] = &["active_plans", "investors", "payouts"];
const ID_FIELDS: &[&str] = &["deposit", "log", "withdrawal"];
const DEPOSIT_FIELDS: &[&str] = &[
    "approved_amount",
    "approved_at",
    "date",
    "id",
    "note",
    "plan",
    "receipt_hash",
    "rejected_at",
    "status",
];
const WITHDRAWAL_FIELDS: &[&str] = &[
    "account",
    "amount",
    "approved_at",
    "date",
    "from_referral",
    "from_wallet",
    "id",
    "method",
    "rejected_at",
    "status",
];
const LOG_FIELDS: &[&str] = &["action", "amount", "date", "details", "id", "subject"];

/// Every struct map in `raw` carries exactly the keys its type expects.
fn check_record_shape(env: &Env, raw: &Val) -> Result<(), Error> {
    let record = struct_map(env, raw, RECORD_FIELDS)?;
    struct_map(env, &field(env, &record, "user")?, USER_FIELDS)?;
    struct_map(env, &field(env, &record, "referral")?, REFERRAL_FIELDS)?;
    struct_map(env, &field(env, &record, "stats")?, STATS_FIELDS)?;
    struct_map(env, &field(env, &record, "next_ids")?, ID_FIELDS)?;
    each_struct(env, &field(env, &record, "deposits")?, DEPOSIT_FIELDS)?;
    each_struct(env, &field(env, &record, "withdrawals")?, WITHDRAWAL_FIELDS)?;
    each_struct(env, &field(env, &record, "history")?, LOG_FIELDS)
}

fn struct_map(env: &Env, val: &Val, fields: &[&str]) -> Result<Map<Val, Val>, Error> {
    let map = Map::<Val, Val>::try_from_val(env, val).map_err(|_| Error::MalformedRecord)?;
    if map.len() as usize != fields.len() {
        return Err(Error::MalformedRecord);
    }
    for name in fields {
        if !map.contains_key(Symbol::new(env, name).into_val(env)) {
            return Err(Error::MalformedRecord);
        }
    }
    Ok(map)
}

fn field(env: &Env, map: &Map<Val, Val>, name: &str) -> Result<Val, Error> {
    map.get(Symbol::new(env, name).into_val(env))
        .ok_or(Error::MalformedRecord)
}

fn each_struct(env: &Env, val: &Val, fields: &[&str]) -> Result<(), Error> {
    let items = Vec::<Val>::try_from_val(env, val).map_err(|_| Error::MalformedRecord)?;
    for item in items.iter() {
        struct_map(env, &item, fields)?;
    }
    Ok(())
}
