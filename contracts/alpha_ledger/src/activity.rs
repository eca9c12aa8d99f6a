//! # Activity log
//!
//! Append-only audit trail kept inside the record. Each state change appends
//! one entry per affected deposit or withdrawal; repeating an operation
//! appends again. The only removal is [`clear`], which drops everything.

use soroban_sdk::{Env, String, Vec};

use crate::types::{AccountRecord, LogAction, LogEntry};
use crate::Error;

/// Hand out the next id from `counter`.
pub fn take_id(counter: &mut u64) -> Result<u64, Error> {
    let id = *counter;
    *counter = id.checked_add(1).ok_or(Error::Overflow)?;
    Ok(id)
}

/// Append one entry and return its id.
pub fn append(
    record: &mut AccountRecord,
    action: LogAction,
    subject: Option<u64>,
    amount: Option<i128>,
    details: String,
    now: u64,
) -> Result<u64, Error> {
    let id = take_id(&mut record.next_ids.log)?;
    record.history.push_back(LogEntry {
        id,
        action,
        subject,
        amount,
        details,
        date: now,
    });
    Ok(id)
}

/// Empty the log. Returns how many entries were dropped.
pub fn clear(env: &Env, record: &mut AccountRecord) -> u32 {
    let removed = record.history.len();
    record.history = Vec::new(env);
    removed
}

/// Log entries, newest first.
pub fn newest_first(env: &Env, record: &AccountRecord) -> Vec<LogEntry> {
    let mut out = Vec::new(env);
    for entry in record.history.iter() {
        out.push_front(entry);
    }
    out
}
