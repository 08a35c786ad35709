//! Human-readable transaction identifiers.
//!
//! Two identifiers are assigned at creation and never mutated: a random
//! confirmation code the client can read over the phone, and a structured
//! format id that encodes currency, phone suffix, timestamp and sequence
//! number.

use chrono::{DateTime, Datelike, Timelike, Utc};
use rand::Rng;

use crate::Currency;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random confirmation code.
pub const CODE_LEN: usize = 7;

/// Random confirmation code: 7 characters uniform over `[A-Z0-9]`.
///
/// Collisions (~1 in 36^7) are accepted and never checked against existing
/// codes; uniqueness enforcement, if any, is the host's call.
pub fn unique_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Primary transaction key, derived from the creation instant.
#[must_use]
pub fn transaction_id(at: DateTime<Utc>) -> String {
    format!("TXN-{}", at.timestamp_millis())
}

/// Structured format id:
/// `{currency}-{last 3 phone digits, zero-padded}-{DDMMHHMMSS}-{sequence}`.
///
/// The phone number is stripped to digits first; fewer than three digits
/// left-pad with zeros. `position` is the size of the collection the record
/// joins, so the 5-digit sequence number is `position + 1`.
#[must_use]
pub fn format_id(
    currency: &Currency,
    phone_number: &str,
    position: usize,
    at: DateTime<Utc>,
) -> String {
    let digits: String = phone_number.chars().filter(|c| c.is_ascii_digit()).collect();
    let suffix = if digits.len() >= 3 {
        digits[digits.len() - 3..].to_string()
    } else {
        format!("{digits:0>3}")
    };
    let stamp = format!(
        "{:02}{:02}{:02}{:02}{:02}",
        at.day(),
        at.month(),
        at.hour(),
        at.minute(),
        at.second()
    );
    format!("{}-{}-{}-{:05}", currency.code(), suffix, stamp, position + 1)
}
