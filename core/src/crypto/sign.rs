//! crypto/sign.rs
//! RSASSA-PSS over SHA-256 with salt length equal to the digest length (32).
//!
//! PSS is randomized: signing the same payload twice gives different bytes,
//! both of which verify. Verification never errors; any malformed input,
//! wrong key or mismatch is simply `false`.

use rand::rngs::OsRng;
use rsa::pss::{BlindedSigningKey, Signature, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::crypto::types::CryptoError;

/// Sign `payload` with RSA-PSS/SHA-256. Salt length is the digest length.
pub fn sign(private_key: &RsaPrivateKey, payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let signing_key = BlindedSigningKey::<Sha256>::new(private_key.clone());
    let signature = signing_key
        .try_sign_with_rng(&mut OsRng, payload)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    Ok(signature.to_vec())
}

/// Verify an RSA-PSS/SHA-256 signature. Comparison happens inside the
/// primitive; signature bytes are never compared directly.
pub fn verify(public_key: &RsaPublicKey, payload: &[u8], signature: &[u8]) -> bool {
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };
    let verifying_key = VerifyingKey::<Sha256>::new(public_key.clone());
    verifying_key.verify(payload, &signature).is_ok()
}
