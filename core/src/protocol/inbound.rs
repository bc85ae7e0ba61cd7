//! protocol/inbound.rs
//! Inbound path: pick the signature, verify it, check freshness and identity,
//! decrypt, then re-check the fields sealed inside the payload.
//!
//! Failures come back as an [`ErrorPayload`] rather than an error type. The
//! decrypted record is only returned once every check has passed.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto::aad::build_aad;
use crate::crypto::aead::decrypt;
use crate::crypto::keys::SymmetricKey;
use crate::crypto::sign::verify;
use crate::envelope::decode::parse_plaintext;
use crate::envelope::types::{CipherContainer, ResponseEnvelope, SecurityFields, SignablePayload};
use crate::guard::freshness::check_identity;
use crate::guard::rotation::{select_signature, KeySelection};
use crate::protocol::context::SecurityContext;
use crate::protocol::env::ProtocolEnv;
use crate::protocol::error::ErrorPayload;
use crate::types::ProtocolError;

/// Binding a sealed container is opened under.
pub(crate) struct OpenParams<'a> {
    pub key: &'a SymmetricKey,
    pub url: &'a str,
    pub app_id: &'a str,
    pub sym_sn: &'a str,
    /// Outer (envelope) timestamp; bound into the AAD and compared with the
    /// sealed `_timestamp`.
    pub timestamp: i64,
}

/// Decrypt a serialized container and re-check its security fields.
pub(crate) fn open_record(
    env: &ProtocolEnv,
    params: &OpenParams<'_>,
    data: &str,
    now: i64,
) -> Result<Map<String, Value>, ProtocolError> {
    let container = CipherContainer::from_json(data)?.decode()?;
    let aad = build_aad(params.url, params.app_id, params.timestamp, params.sym_sn);
    let plaintext = Zeroizing::new(decrypt(
        params.key.as_bytes(),
        &container.iv,
        &container.ciphertext,
        &container.tag,
        &aad,
    )?);

    let record = parse_plaintext(&plaintext)?;
    SecurityFields::extract(&record)?.check(params.app_id, params.timestamp, now, &env.window)?;
    Ok(record)
}

/// Standard base64 signature; anything undecodable cannot verify.
pub(crate) fn decode_signature(encoded: &str) -> Result<Vec<u8>, ProtocolError> {
    STANDARD.decode(encoded.trim()).map_err(|_| ProtocolError::SignatureInvalid)
}

fn verify_and_open(
    ctx: &SecurityContext,
    env: &ProtocolEnv,
    response: &ResponseEnvelope,
) -> Result<Map<String, Value>, ProtocolError> {
    let candidates = response.serial_candidates();
    let encoded = match select_signature(&ctx.private_sn, &candidates) {
        KeySelection::Primary { signature } => signature,
        KeySelection::Deprecated { signature } => {
            warn!(
                serial = %ctx.private_sn,
                current = %response.resp_sn,
                "response signed with a deprecated platform certificate, update the local certificate"
            );
            signature
        }
        KeySelection::NoneMatched => return Err(candidates.mismatch(&ctx.private_sn).into()),
    };

    let signature = decode_signature(encoded)?;
    let payload = SignablePayload::for_response(&ctx.url, response);
    if !verify(&ctx.verifying_key()?, payload.as_bytes(), &signature) {
        return Err(ProtocolError::SignatureInvalid);
    }

    check_identity(&ctx.app_id, &response.resp_appid)?;
    let now = env.now();
    env.window.check(now, response.resp_ts)?;

    let key = ctx.symmetric_key()?;
    let params = OpenParams {
        key: &key,
        url: &ctx.url,
        app_id: &ctx.app_id,
        sym_sn: &ctx.sym_sn,
        timestamp: response.resp_ts,
    };
    let record = open_record(env, &params, &response.resp_data, now)?;
    debug!(url = %ctx.url, ts = response.resp_ts, "opened response");
    Ok(record)
}

fn reject(ctx: &SecurityContext, err: ProtocolError) -> ErrorPayload {
    let payload = ErrorPayload::from(&err);
    warn!(url = %ctx.url, errcode = payload.errcode, error = %err, "rejected response");
    payload
}

/// Verify and decrypt a response envelope.
///
/// Returns the whole decrypted object, security fields included.
pub fn check_and_decrypt(
    ctx: &SecurityContext,
    env: &ProtocolEnv,
    response: &ResponseEnvelope,
) -> Result<Map<String, Value>, ErrorPayload> {
    verify_and_open(ctx, env, response).map_err(|e| reject(ctx, e))
}

/// [`check_and_decrypt`] on the raw HTTP body.
pub fn check_and_decrypt_raw(
    ctx: &SecurityContext,
    env: &ProtocolEnv,
    raw_body: &str,
) -> Result<Map<String, Value>, ErrorPayload> {
    let response = ResponseEnvelope::from_json(raw_body).map_err(|e| reject(ctx, e.into()))?;
    check_and_decrypt(ctx, env, &response)
}
