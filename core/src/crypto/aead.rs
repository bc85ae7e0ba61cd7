//! crypto/aead.rs
//! AES-256-GCM codec with a detached authentication tag.
//!
//! Design notes:
//! - 32-byte keys, 12-byte IVs, 16-byte tags.
//! - A failed tag check returns no plaintext at all.
//! - AAD comes from `crypto::aad` and is passed in on every call.
//! - The wire container carries the tag separately, so seal splits it off the
//!   ciphertext and open re-appends it before handing both to the cipher.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::crypto::nonce::{generate_iv, RandomSource};
use crate::crypto::types::{CryptoError, Sealed, IV_LEN_12, KEY_LEN_32, TAG_LEN_16};

/// AES-256-GCM bound to one key.
#[derive(Clone)]
pub struct AeadCodec {
    cipher: Aes256Gcm,
}

impl AeadCodec {
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != KEY_LEN_32 {
            return Err(CryptoError::InvalidKeyLen {
                expected: KEY_LEN_32,
                actual: key.len(),
            });
        }

        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_32,
            actual: key.len(),
        })?;
        Ok(Self { cipher })
    }

    /// Seal `plaintext` under `iv` with `aad` bound as associated data.
    pub fn seal(
        &self,
        iv: [u8; IV_LEN_12],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Sealed, CryptoError> {
        let mut ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&iv), Payload { msg: plaintext, aad })
            .map_err(|_| CryptoError::Failure("AES-GCM seal failed".into()))?;

        if ciphertext.len() < TAG_LEN_16 {
            return Err(CryptoError::Failure("AES-GCM output shorter than tag".into()));
        }
        let tag_bytes = ciphertext.split_off(ciphertext.len() - TAG_LEN_16);
        let mut tag = [0u8; TAG_LEN_16];
        tag.copy_from_slice(&tag_bytes);

        Ok(Sealed { iv, ciphertext, tag })
    }

    /// Open a detached-tag ciphertext. Any tampering with the ciphertext, tag,
    /// IV or AAD yields `TagMismatch` and no plaintext.
    pub fn open(
        &self,
        iv: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if iv.len() != IV_LEN_12 {
            return Err(CryptoError::InvalidIvLen {
                expected: IV_LEN_12,
                actual: iv.len(),
            });
        }
        // A truncated or padded tag can never authenticate.
        if tag.len() != TAG_LEN_16 {
            return Err(CryptoError::TagMismatch);
        }

        let mut ciphertext_and_tag = Vec::with_capacity(ciphertext.len() + TAG_LEN_16);
        ciphertext_and_tag.extend_from_slice(ciphertext);
        ciphertext_and_tag.extend_from_slice(tag);

        self.cipher
            .decrypt(Nonce::from_slice(iv), Payload { msg: &ciphertext_and_tag, aad })
            .map_err(|_| CryptoError::TagMismatch)
    }
}

/// Encrypt with a fresh random IV drawn from `random`.
pub fn encrypt(
    key: &[u8],
    plaintext: &[u8],
    aad: &[u8],
    random: &dyn RandomSource,
) -> Result<Sealed, CryptoError> {
    let codec = AeadCodec::new(key)?;
    codec.seal(generate_iv(random), aad, plaintext)
}

/// Decrypt and authenticate; see [`AeadCodec::open`].
pub fn decrypt(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    AeadCodec::new(key)?.open(iv, aad, ciphertext, tag)
}
