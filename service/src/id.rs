//! Short random identifiers for schema elements
//!
//! Identifiers are drawn from the RFC 4648 base32 alphabet, which has no
//! lowercase letters and none of the easily confused digits `0`, `1`, `8`
//! and `9`.

use rand::Rng;
use rand::rngs::OsRng;

/// RFC 4648 base32 alphabet
pub const ID_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Length used when none is given
pub const DEFAULT_ID_LENGTH: usize = 8;

/// Generate `length` characters chosen uniformly from [`ID_ALPHABET`] using
/// the operating system's secure random source
#[must_use]
pub fn generate_id(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect()
}
