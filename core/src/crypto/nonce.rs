//! crypto/nonce.rs
//! Randomness for the per-call AEAD IV and the `_n` request nonce.
//!
//! Design:
//! - IVs are drawn from a random source per call, never from a counter, so
//!   concurrent callers sharing one key need no coordination.
//! - The source is an injected collaborator: production uses the OS RNG,
//!   tests plug in a seeded generator to pin exact framing.

use std::sync::Mutex;

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

use crate::constants::REQUEST_NONCE_LEN;
use crate::crypto::types::IV_LEN_12;

/// Source of random bytes for IVs and nonces.
pub trait RandomSource: Send + Sync {
    fn fill(&self, dest: &mut [u8]);
}

/// Operating-system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    #[inline]
    fn fill(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Deterministic generator for tests and reproducible fixtures.
///
/// Never use outside tests: the whole stream is predictable from the seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl RandomSource for SeededRandom {
    fn fill(&self, dest: &mut [u8]) {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.fill_bytes(dest);
    }
}

/// Draw a fresh 12-byte AES-GCM IV.
#[inline]
pub fn generate_iv(random: &dyn RandomSource) -> [u8; IV_LEN_12] {
    let mut iv = [0u8; IV_LEN_12];
    random.fill(&mut iv);
    iv
}

/// Draw the `_n` nonce: 16 random bytes, standard base64 without padding.
pub fn request_nonce(random: &dyn RandomSource) -> String {
    let mut raw = [0u8; REQUEST_NONCE_LEN];
    random.fill(&mut raw);
    STANDARD_NO_PAD.encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_has_no_padding() {
        let nonce = request_nonce(&OsRandom);
        // 16 bytes -> 22 base64 chars once the "==" is stripped
        assert_eq!(nonce.len(), 22);
        assert!(!nonce.contains('='));
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let a = SeededRandom::new(7);
        let b = SeededRandom::new(7);
        assert_eq!(generate_iv(&a), generate_iv(&b));
        assert_ne!(generate_iv(&a), generate_iv(&SeededRandom::new(8)));
    }

    #[test]
    fn consecutive_ivs_differ() {
        let src = SeededRandom::new(1);
        assert_ne!(generate_iv(&src), generate_iv(&src));
    }
}
