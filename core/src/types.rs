use thiserror::Error;

use crate::{
    crypto::CryptoError,
    envelope::EnvelopeError,
    guard::GuardError,
    protocol::error::ErrorCode,
};

/// Unified protocol error covering key material, AEAD, signatures, freshness,
/// rotation, identity and envelope shape.
/// - `From<T>` impls enable `?` across the layers.
/// - Every variant maps to a stable numeric `ErrorCode` for the inbound payload.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Symmetric key is not 32 bytes or PEM material is malformed.
    #[error("key format error: {0}")]
    KeyFormat(String),

    /// AEAD tag verification failed (tampering, wrong key or wrong AAD).
    #[error("auth tag verification failed")]
    AuthTagMismatch,

    /// RSA-PSS verification failed.
    #[error("signature verification failed")]
    SignatureInvalid,

    /// Neither the primary nor the deprecated serial matches.
    #[error("serial mismatch: expected={expected}, primary={primary}, deprecated={deprecated}")]
    SerialMismatch {
        expected: String,
        primary: String,
        deprecated: String,
    },

    /// Outer or inner timestamp outside the window, or the two disagree.
    #[error("stale message: {0}")]
    StaleMessage(String),

    /// App id in the envelope or decrypted payload differs from the context.
    #[error("app id mismatch: expected={expected}, actual={actual}")]
    IdentityMismatch { expected: String, actual: String },

    /// Unparseable JSON, base64, IV length or missing security field.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Outbound body is not a JSON object.
    #[error("request body must be a JSON object")]
    BodyNotObject,

    /// Primitive failure unrelated to inputs (e.g. RSA blinding).
    #[error("crypto failure: {0}")]
    CryptoFailure(String),
}

impl ProtocolError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProtocolError::KeyFormat(_) => ErrorCode::KeyFormat,
            ProtocolError::AuthTagMismatch => ErrorCode::AuthTagMismatch,
            ProtocolError::SignatureInvalid => ErrorCode::SignatureInvalid,
            ProtocolError::SerialMismatch { .. } => ErrorCode::SerialMismatch,
            ProtocolError::StaleMessage(_) => ErrorCode::StaleMessage,
            ProtocolError::IdentityMismatch { .. } => ErrorCode::IdentityMismatch,
            ProtocolError::MalformedEnvelope(_) => ErrorCode::MalformedEnvelope,
            ProtocolError::BodyNotObject => ErrorCode::BodyNotObject,
            ProtocolError::CryptoFailure(_) => ErrorCode::CryptoFailure,
        }
    }
}

impl From<CryptoError> for ProtocolError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::TagMismatch => ProtocolError::AuthTagMismatch,
            CryptoError::InvalidKeyLen { .. } | CryptoError::KeyFormat(_) => {
                ProtocolError::KeyFormat(e.to_string())
            }
            CryptoError::InvalidIvLen { .. } => ProtocolError::MalformedEnvelope(e.to_string()),
            CryptoError::SigningFailed(_) | CryptoError::Failure(_) => {
                ProtocolError::CryptoFailure(e.to_string())
            }
        }
    }
}

impl From<GuardError> for ProtocolError {
    fn from(e: GuardError) -> Self {
        match e {
            GuardError::Stale { .. } | GuardError::TimestampMismatch { .. } => {
                ProtocolError::StaleMessage(e.to_string())
            }
            GuardError::IdentityMismatch { expected, actual } => {
                ProtocolError::IdentityMismatch { expected, actual }
            }
            GuardError::SerialMismatch { expected, primary, deprecated } => {
                ProtocolError::SerialMismatch { expected, primary, deprecated }
            }
        }
    }
}

impl From<EnvelopeError> for ProtocolError {
    fn from(e: EnvelopeError) -> Self {
        ProtocolError::MalformedEnvelope(e.to_string())
    }
}
