use std::collections::HashSet;

use tinylink::utils::{CODE_ALPHABET, code_space_size, generate_random_code};

#[test]
fn test_generate_random_code_length() {
    assert_eq!(generate_random_code(6).len(), 6);
    assert_eq!(generate_random_code(10).len(), 10);
    assert_eq!(generate_random_code(1).len(), 1);
    assert_eq!(generate_random_code(0).len(), 0);
}

#[test]
fn test_generate_random_code_characters() {
    let code = generate_random_code(200);
    let valid_chars: HashSet<char> = CODE_ALPHABET.iter().map(|&b| b as char).collect();

    for ch in code.chars() {
        assert!(valid_chars.contains(&ch), "Invalid character: {}", ch);
    }
}

#[test]
fn test_alphabet_has_62_distinct_symbols() {
    let distinct: HashSet<u8> = CODE_ALPHABET.iter().copied().collect();
    assert_eq!(distinct.len(), 62);
    assert!(CODE_ALPHABET.iter().all(|b| b.is_ascii_alphanumeric()));
}

#[test]
fn test_generate_random_code_uniqueness() {
    let codes: HashSet<String> = (0..1000).map(|_| generate_random_code(8)).collect();

    // 应该生成大量不同的代码
    assert!(codes.len() > 990, "Generated codes lack sufficient randomness");
}

#[test]
fn test_all_symbols_reachable() {
    let code = generate_random_code(20_000);
    let seen: HashSet<char> = code.chars().collect();
    assert_eq!(seen.len(), 62);
}

#[test]
fn test_code_space_size() {
    assert_eq!(code_space_size(0), 1);
    assert_eq!(code_space_size(1), 62);
    assert_eq!(code_space_size(2), 3844);
    assert_eq!(code_space_size(64), u128::MAX);
}
