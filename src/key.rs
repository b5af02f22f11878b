use crate::error::{CfResult, CipherForgeError};
use std::fmt;

pub const ALPHABET_LEN: usize = 26;

/// A substitution key: position `i` holds the plaintext letter for
/// ciphertext offset `i`. Invariant: always a permutation of `A..=Z`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Key([u8; ALPHABET_LEN]);

impl Key {
    pub fn identity() -> Self {
        let mut bytes = [0u8; ALPHABET_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = b'A' + i as u8;
        }
        Key(bytes)
    }

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let mut key = Self::identity();
        rng.shuffle(&mut key.0);
        key
    }

    /// Validates the permutation invariant; rejects anything that is not
    /// exactly the 26 uppercase letters, each once.
    pub fn from_bytes(bytes: &[u8]) -> CfResult<Self> {
        if bytes.len() != ALPHABET_LEN {
            return Err(CipherForgeError::Config(format!(
                "key must be {} letters, got {}",
                ALPHABET_LEN,
                bytes.len()
            )));
        }
        let mut seen = [false; ALPHABET_LEN];
        let mut out = [0u8; ALPHABET_LEN];
        for (i, &b) in bytes.iter().enumerate() {
            let up = b.to_ascii_uppercase();
            if !up.is_ascii_uppercase() {
                return Err(CipherForgeError::Config(format!(
                    "key byte 0x{:02X} at position {} is not a letter",
                    b, i
                )));
            }
            let off = (up - b'A') as usize;
            if seen[off] {
                return Err(CipherForgeError::Config(format!(
                    "key repeats letter '{}'",
                    up as char
                )));
            }
            seen[off] = true;
            out[i] = up;
        }
        Ok(Key(out))
    }

    /// Internal constructor for operators that preserve the permutation
    /// invariant structurally (transpositions, repaired crossover).
    pub(crate) fn from_array_unchecked(bytes: [u8; ALPHABET_LEN]) -> Self {
        debug_assert!(Key::from_bytes(&bytes).is_ok());
        Key(bytes)
    }

    /// Plaintext letter for a ciphertext offset in `0..26`.
    #[inline(always)]
    pub fn plain(&self, offset: u8) -> u8 {
        self.0[offset as usize]
    }

    /// The inverse mapping: if `self` decodes C -> P, the inverse decodes P -> C.
    pub fn invert(&self) -> Self {
        let mut inv = [0u8; ALPHABET_LEN];
        for (i, &p) in self.0.iter().enumerate() {
            inv[(p - b'A') as usize] = b'A' + i as u8;
        }
        Key(inv)
    }

    pub fn as_bytes(&self) -> &[u8; ALPHABET_LEN] {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Always valid: permutation of ASCII letters
        f.write_str(std::str::from_utf8(&self.0).unwrap_or("<invalid>"))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self)
    }
}

/// Fitness of a candidate. Replaces the classic "-1 means not scored yet"
/// sentinel with an explicit variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Score {
    Unevaluated,
    Scored(f64),
}

impl Score {
    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Unevaluated => None,
            Score::Scored(v) => Some(*v),
        }
    }
}

/// A key paired with its (possibly stale) fitness. Breeding always emits
/// `Score::Unevaluated`; selection never trusts a prior score.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub key: Key,
    pub score: Score,
}

impl Candidate {
    pub fn unevaluated(key: Key) -> Self {
        Candidate {
            key,
            score: Score::Unevaluated,
        }
    }

    pub fn scored(key: Key, value: f64) -> Self {
        Candidate {
            key,
            score: Score::Scored(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_to_itself() {
        let key = Key::identity();
        assert_eq!(key.plain(0), b'A');
        assert_eq!(key.plain(25), b'Z');
    }

    #[test]
    fn from_bytes_rejects_duplicates() {
        let mut bytes = *Key::identity().as_bytes();
        bytes[1] = b'A';
        assert!(Key::from_bytes(&bytes).is_err());
    }

    #[test]
    fn from_bytes_uppercases() {
        let key = Key::from_bytes(b"zyxwvutsrqponmlkjihgfedcba").unwrap();
        assert_eq!(key.plain(0), b'Z');
    }

    #[test]
    fn invert_round_trips() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..20 {
            let key = Key::random(&mut rng);
            let inv = key.invert();
            for off in 0u8..26 {
                assert_eq!(inv.plain(key.plain(off) - b'A'), b'A' + off);
            }
        }
    }
}
