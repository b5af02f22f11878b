//! Applies permutation keys to ciphertext. The core assumes pre-sanitized
//! input (uppercase A-Z only); anything else is surfaced as `InvalidSymbol`
//! at this boundary rather than a panic deeper in the loop.

use crate::error::{CfResult, CipherForgeError};
use crate::key::Key;

/// Decodes `ciphertext` by mapping each symbol's alphabet offset through `key`.
pub fn decode(ciphertext: &[u8], key: &Key) -> CfResult<Vec<u8>> {
    let mut out = Vec::with_capacity(ciphertext.len());
    for (position, &byte) in ciphertext.iter().enumerate() {
        if !byte.is_ascii_uppercase() {
            return Err(CipherForgeError::InvalidSymbol { byte, position });
        }
        out.push(key.plain(byte - b'A'));
    }
    Ok(out)
}

/// Substitution-encodes `plaintext` so that `decode(encode(p, k), k) == p`.
pub fn encode(plaintext: &[u8], key: &Key) -> CfResult<Vec<u8>> {
    decode(plaintext, &key.invert())
}

/// Caller-side sanitizer: uppercases and strips everything outside A-Z.
pub fn normalize(text: &str) -> Vec<u8> {
    text.bytes()
        .filter(|b| b.is_ascii_alphabetic())
        .map(|b| b.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_lowercase() {
        let key = Key::identity();
        let err = decode(b"ABc", &key).unwrap_err();
        match err {
            crate::error::CipherForgeError::InvalidSymbol { byte, position } => {
                assert_eq!(byte, b'c');
                assert_eq!(position, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn normalize_strips_and_uppercases() {
        assert_eq!(normalize("Attack at dawn, 5am!"), b"ATTACKATDAWNAM".to_vec());
    }
}
