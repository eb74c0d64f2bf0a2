pub mod url_validator;

/// 短码字符表：小写、大写字母和数字，共 62 个
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draws `length` characters uniformly from [`CODE_ALPHABET`].
///
/// Collision checks against stored links happen in the link store, which
/// claims the candidate key atomically.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Number of distinct codes of the given length, saturating at `u128::MAX`
pub fn code_space_size(length: usize) -> u128 {
    let base = CODE_ALPHABET.len() as u128;
    (0..length).try_fold(1u128, |acc, _| acc.checked_mul(base)).unwrap_or(u128::MAX)
}
