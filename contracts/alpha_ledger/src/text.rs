//! Byte-level text helpers.
//!
//! Contract strings live in the host; to inspect them we copy into a fixed
//! stack buffer. Every string the ledger stores is length-checked on the way
//! in, so the buffers below always fit.

use soroban_sdk::{Bytes, Env, String};

use crate::constants::{CENTS, MAX_TEXT_LEN};
use crate::Error;

/// Longest `details` a log entry can carry: two joined fields plus separator.
pub const MAX_DETAILS_LEN: usize = 2 * MAX_TEXT_LEN + 8;

/// Reject user-supplied text longer than `MAX_TEXT_LEN`.
pub fn check_len(text: &String) -> Result<(), Error> {
    if text.len() as usize > MAX_TEXT_LEN {
        return Err(Error::FieldTooLong);
    }
    Ok(())
}

/// Run `f` over the raw bytes of `text`. Strings longer than
/// `MAX_DETAILS_LEN` are seen as empty.
pub fn with_bytes<R>(text: &String, f: impl FnOnce(&[u8]) -> R) -> R {
    let len = text.len() as usize;
    if len > MAX_DETAILS_LEN {
        return f(&[]);
    }
    let mut buf = [0u8; MAX_DETAILS_LEN];
    text.copy_into_slice(&mut buf[..len]);
    f(&buf[..len])
}

/// True when `text` is empty or only ASCII whitespace.
pub fn is_blank(text: &String) -> bool {
    if text.len() as usize > MAX_DETAILS_LEN {
        return false;
    }
    with_bytes(text, |b| b.iter().all(|c| c.is_ascii_whitespace()))
}

/// `bytes` without leading and trailing ASCII whitespace.
pub fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|c| !c.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|c| !c.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// ASCII case-insensitive substring test. An empty needle matches.
pub fn contains_ci(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle))
}

/// `a`, `sep`, `b` concatenated. Falls back to `a` when the pieces are not
/// valid UTF-8.
pub fn join(env: &Env, a: &String, sep: &str, b: &String) -> String {
    let a_len = a.len() as usize;
    let b_len = b.len() as usize;
    let total = a_len + sep.len() + b_len;
    if total > MAX_DETAILS_LEN {
        return a.clone();
    }
    let mut buf = [0u8; MAX_DETAILS_LEN];
    a.copy_into_slice(&mut buf[..a_len]);
    buf[a_len..a_len + sep.len()].copy_from_slice(sep.as_bytes());
    b.copy_into_slice(&mut buf[a_len + sep.len()..total]);
    match core::str::from_utf8(&buf[..total]) {
        Ok(s) => String::from_str(env, s),
        Err(_) => a.clone(),
    }
}

/// Contract string from ASCII bytes; empty if `bytes` is not UTF-8.
pub fn from_ascii(env: &Env, bytes: &[u8]) -> String {
    match core::str::from_utf8(bytes) {
        Ok(s) => String::from_str(env, s),
        Err(_) => String::from_str(env, ""),
    }
}

// ─────────────────────────────────────────────────────────
// Number formatting
// ─────────────────────────────────────────────────────────

/// Decimal rendering of a number, right-aligned in a stack buffer.
pub struct Digits {
    buf: [u8; 48],
    start: usize,
}

impl Digits {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    pub fn from_u64(n: u64) -> Self {
        Self::from_u128(n as u128, false, None)
    }

    /// Two-decimal money form of a minor-unit amount: `150050` -> `1500.50`.
    pub fn money(cents: i128) -> Self {
        let negative = cents < 0;
        let abs = cents.unsigned_abs();
        let scale = CENTS as u128;
        Self::from_u128(abs / scale, negative, Some((abs % scale) as u8))
    }

    fn from_u128(mut whole: u128, negative: bool, fraction: Option<u8>) -> Self {
        let mut buf = [0u8; 48];
        let mut pos = buf.len();
        if let Some(frac) = fraction {
            pos -= 1;
            buf[pos] = b'0' + frac % 10;
            pos -= 1;
            buf[pos] = b'0' + frac / 10;
            pos -= 1;
            buf[pos] = b'.';
        }
        loop {
            pos -= 1;
            buf[pos] = b'0' + (whole % 10) as u8;
            whole /= 10;
            if whole == 0 {
                break;
            }
        }
        if negative {
            pos -= 1;
            buf[pos] = b'-';
        }
        Digits { buf, start: pos }
    }

    pub fn append_to(&self, out: &mut Bytes) {
        out.extend_from_slice(self.as_bytes());
    }
}
