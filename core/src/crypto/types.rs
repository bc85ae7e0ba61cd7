//! crypto/types.rs
//! Shared lengths, sealed output and the crypto-layer error.

use thiserror::Error;

/// AES-256 key length (bytes).
pub const KEY_LEN_32: usize = 32;

/// Standard 12-byte IV length for AES-GCM.
pub const IV_LEN_12: usize = 12;

/// Fixed AEAD tag length (bytes).
pub const TAG_LEN_16: usize = 16;

/// Output of one AEAD seal: fresh IV, ciphertext and the detached tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub iv: [u8; IV_LEN_12],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN_16],
}

#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid key length provided to cipher.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// IV length mismatch (must be 12 bytes).
    #[error("invalid IV length: expected={expected}, actual={actual}")]
    InvalidIvLen { expected: usize, actual: usize },

    /// AEAD tag mismatch (authentication failure, wrong key or wrong AAD).
    #[error("AEAD tag mismatch")]
    TagMismatch,

    /// Key material could not be decoded (base64, PEM, DER, X.509).
    #[error("key format error: {0}")]
    KeyFormat(String),

    /// RSA-PSS signing failed.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// General runtime error with context.
    #[error("crypto failure: {0}")]
    Failure(String),
}
