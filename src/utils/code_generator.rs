//! Short code generation.

use rand::Rng;

/// Characters a generated code is drawn from: `a-z`, `A-Z`, `0-9`.
pub const ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generates a random alphanumeric code of `length` characters.
///
/// Each character is drawn uniformly from [`ALPHABET`]. Uniqueness is not
/// checked here; see [`crate::application::services::LinkService::allocate_code`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
