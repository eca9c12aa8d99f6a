//! Ledger constants.
//!
//! All currency values are minor units (centavos): 100 = 1.00.

/// Minor units per whole currency unit.
pub const CENTS: i128 = 100;

// Plan entry ranges (inclusive)
pub const BASIC_MIN: i128 = 2_500 * CENTS;
pub const BASIC_MAX: i128 = 50_000 * CENTS;
pub const PREMIUM_MIN: i128 = 10_000 * CENTS;
pub const PREMIUM_MAX: i128 = 50_000 * CENTS;
pub const VIP_MIN: i128 = 50_000 * CENTS;
pub const VIP_MAX: i128 = 250_000 * CENTS;

// Field limits
pub const MAX_TEXT_LEN: usize = 256; // notes, usernames, payout accounts, queries
pub const MAX_RECEIPT_LEN: u32 = 4_096;
pub const REFERRAL_CODE_LEN: usize = 7;

/// Investor count shown on a fresh record.
pub const DEFAULT_INVESTORS: u32 = 1;

/// Alphabet used for generated referral codes.
pub const REFERRAL_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
