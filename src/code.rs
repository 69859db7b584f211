//! License code generation for Appcast.
//!
//! Codes are 16 characters drawn from the uppercase-alphanumeric alphabet,
//! grouped into four dash-separated blocks: `XXXX-XXXX-XXXX-XXXX`.
//! The OS random source is used so codes are not guessable.

use rand::rngs::OsRng;
use rand::Rng;

/// Alphabet for license codes (36 symbols).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of random characters in a code, excluding dashes.
const CODE_LEN: usize = 16;

/// Generates a new random license code in `XXXX-XXXX-XXXX-XXXX` form.
pub fn generate_code() -> String {
    let mut code = String::with_capacity(CODE_LEN + 3);
    for i in 0..CODE_LEN {
        if i > 0 && i % 4 == 0 {
            code.push('-');
        }
        let idx = OsRng.gen_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}

/// Validate that a string looks like a license code.
///
/// This is a cheap check to reject garbage before scanning the store.
pub fn is_valid_code(s: &str) -> bool {
    let blocks: Vec<&str> = s.split('-').collect();
    blocks.len() == 4
        && blocks.iter().all(|b| {
            b.len() == 4
                && b.bytes()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        })
}
