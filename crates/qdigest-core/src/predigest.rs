//! Classical pre-digest of the password.
//!
//! The password is hashed once with SHA-256 before any simulation
//! happens. The first `n/4` hex characters of that digest become the
//! `n`-bit initialization pattern for the quantum register; the last
//! 16 hex characters are retained as the tail that is appended to the
//! final digest string.

use sha2::{Digest, Sha256};

use crate::error::{DigestError, DigestResult};

/// Number of hex characters kept as the digest tail.
pub const TAIL_HEX_CHARS: usize = 16;

/// Classical pre-digest: initialization pattern plus hex tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreDigest {
    /// One bit per qubit; bit `i` drives the bit-flip on qubit `i`.
    pattern: Vec<bool>,
    /// Last 16 hex characters of the SHA-256 digest.
    tail: String,
}

impl PreDigest {
    /// Hash `password` and derive an `n_qubits`-bit pattern from it.
    ///
    /// `n_qubits` must be a positive multiple of 4 so that the pattern
    /// maps onto whole hex characters. The reference width is 20.
    pub fn new(password: &[u8], n_qubits: usize) -> DigestResult<Self> {
        if password.is_empty() {
            return Err(DigestError::InvalidInput("password is empty".into()));
        }
        if n_qubits == 0 || n_qubits % 4 != 0 {
            return Err(DigestError::InvalidInput(format!(
                "qubit count must be a positive multiple of 4, got {n_qubits}"
            )));
        }
        let hex = sha256_hex(password);
        // SHA-256 renders to 64 hex chars; the pattern takes n/4 of
        // them and the tail takes the trailing 16. They may overlap
        // only for absurd widths, which the ceiling in the pipeline
        // rules out anyway.
        debug_assert!(n_qubits / 4 <= hex.len());

        let pattern = hex[..n_qubits / 4]
            .bytes()
            .flat_map(|c| {
                let nibble = (c as char).to_digit(16).unwrap_or(0) as u8;
                // MSB of the nibble first, matching the textual binary
                // expansion of each hex character.
                (0..4).rev().map(move |b| nibble & (1 << b) != 0)
            })
            .collect();
        let tail = hex[hex.len() - TAIL_HEX_CHARS..].to_string();

        Ok(Self { pattern, tail })
    }

    /// Per-qubit initialization bits, qubit `i` at position `i`.
    pub fn pattern(&self) -> &[bool] {
        &self.pattern
    }

    /// The pattern packed into a basis index (bit `i` ↔ qubit `i`).
    pub fn pattern_index(&self) -> usize {
        self.pattern
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .fold(0, |acc, (i, _)| acc | (1 << i))
    }

    /// Trailing 16 hex characters of the classical digest.
    pub fn tail(&self) -> &str {
        &self.tail
    }
}

/// SHA-256 of `data` as lowercase hex.
fn sha256_hex(data: &[u8]) -> String {
    use std::fmt::Write;

    let digest = Sha256::digest(data);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    // NIST known-answer vector for SHA-256("abc").
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn sha256_known_answer() {
        assert_eq!(sha256_hex(b"abc"), ABC_SHA256);
    }

    #[test]
    fn pattern_expands_leading_hex_chars() {
        // "ba781" → 1011 1010 0111 1000 0001
        let pre = PreDigest::new(b"abc", 20).unwrap();
        let expected: Vec<bool> = "10111010011110000001"
            .chars()
            .map(|c| c == '1')
            .collect();
        assert_eq!(pre.pattern(), expected.as_slice());
    }

    #[test]
    fn tail_is_last_16_hex_chars() {
        let pre = PreDigest::new(b"abc", 20).unwrap();
        assert_eq!(pre.tail(), &ABC_SHA256[48..]);
    }

    #[test]
    fn pattern_index_packs_bit_per_qubit() {
        let pre = PreDigest::new(b"abc", 20).unwrap();
        let idx = pre.pattern_index();
        for (i, &bit) in pre.pattern().iter().enumerate() {
            assert_eq!(idx & (1 << i) != 0, bit);
        }
    }

    #[test]
    fn empty_password_rejected() {
        assert!(matches!(
            PreDigest::new(b"", 20),
            Err(DigestError::InvalidInput(_))
        ));
    }

    #[test]
    fn qubit_count_must_be_multiple_of_four() {
        assert!(matches!(
            PreDigest::new(b"abc", 18),
            Err(DigestError::InvalidInput(_))
        ));
        assert!(matches!(
            PreDigest::new(b"abc", 0),
            Err(DigestError::InvalidInput(_))
        ));
    }
}
