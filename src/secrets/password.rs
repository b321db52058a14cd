//! Random password generation.
//!
//! Every character is drawn independently and uniformly from [`ALPHABET`]
//! using the operating system CSPRNG.

use rand::rngs::OsRng;
use rand::Rng;

use super::types::SecretString;

/// Symbols a generated password may contain: ASCII letters, digits and `!@#$%^&*`.
pub const ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Symbol characters included in [`ALPHABET`].
pub const SYMBOLS: &str = "!@#$%^&*";

/// Shortest password length accepted by configuration.
pub const MIN_PASSWORD_LENGTH: usize = 16;

/// Length of the rotated administrative password.
pub const ADMIN_PASSWORD_LENGTH: usize = 20;

/// Length of the application user's password.
pub const APP_PASSWORD_LENGTH: usize = 16;

/// Generate a password of exactly `length` characters.
pub fn generate_password(length: usize) -> SecretString {
    let mut rng = OsRng;
    let password: String =
        (0..length).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char).collect();
    SecretString::new(password)
}

/// Returns true when every character of `candidate` belongs to [`ALPHABET`].
pub fn is_from_alphabet(candidate: &str) -> bool {
    candidate.bytes().all(|b| ALPHABET.contains(&b))
}

/// Count the character classes (upper, lower, digit, symbol) present in `value`.
pub fn character_classes(value: &str) -> usize {
    let upper = value.chars().any(|c| c.is_ascii_uppercase());
    let lower = value.chars().any(|c| c.is_ascii_lowercase());
    let digit = value.chars().any(|c| c.is_ascii_digit());
    let symbol = value.chars().any(|c| SYMBOLS.contains(c));
    [upper, lower, digit, symbol].iter().filter(|present| **present).count()
}
