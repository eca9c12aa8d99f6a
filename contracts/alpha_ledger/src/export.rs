//! CSV rendering of the activity log.
//!
//! ```text
//! Date,Action,Details
//! "1700000000","approve_deposit","id=3;subject=1;amount=60000.00;note=bpi ""rush"""
//! ```
//!
//! Every field is quoted and embedded quotes are doubled. Rows are separated
//! by `\n` with no trailing newline.

use soroban_sdk::{Bytes, Env};

use crate::text::{self, Digits};
use crate::types::{AccountRecord, LogEntry};
use crate::Error;

const HEADER: &[u8] = b"Date,Action,Details";

pub fn activity_csv(env: &Env, record: &AccountRecord) -> Result<Bytes, Error> {
    if record.history.is_empty() {
        return Err(Error::NothingToExport);
    }
    let mut out = Bytes::from_slice(env, HEADER);
    for entry in record.history.iter() {
        out.push_back(b'\n');
        push_row(&mut out, &entry);
    }
    Ok(out)
}

fn push_row(out: &mut Bytes, entry: &LogEntry) {
    push_quoted(out, Digits::from_u64(entry.date).as_bytes());
    out.push_back(b',');
    push_quoted(out, entry.action.tag().as_bytes());
    out.push_back(b',');

    out.push_back(b'"');
    push_escaped(out, b"id=");
    Digits::from_u64(entry.id).append_to(out);
    if let Some(subject) = entry.subject {
        push_escaped(out, b";subject=");
        Digits::from_u64(subject).append_to(out);
    }
    if let Some(amount) = entry.amount {
        push_escaped(out, b";amount=");
        Digits::money(amount).append_to(out);
    }
    if entry.details.len() > 0 {
        push_escaped(out, b";note=");
        text::with_bytes(&entry.details, |details| push_escaped(out, details));
    }
    out.push_back(b'"');
}

fn push_quoted(out: &mut Bytes, field: &[u8]) {
    out.push_back(b'"');
    push_escaped(out, field);
    out.push_back(b'"');
}

fn push_escaped(out: &mut Bytes, field: &[u8]) {
    for &b in field {
        if b == b'"' {
            out.push_back(b'"');
        }
        out.push_back(b);
    }
}
