//! protocol/outbound.rs
//! Outbound path: seal the request body, sign the envelope, attach headers.
//!
//! Pure transformation. The caller's options are left untouched and a new
//! `RequestOptions` is returned; nothing here performs I/O.

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::RsaPrivateKey;
use serde_json::{Map, Value};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::aad::build_aad;
use crate::crypto::aead::encrypt;
use crate::crypto::keys::SymmetricKey;
use crate::crypto::nonce::request_nonce;
use crate::crypto::sign::sign;
use crate::envelope::encode::{body_as_object, compose_plaintext, serialize_plaintext};
use crate::envelope::types::{
    CipherContainer, EnvelopeError, RequestEnvelope, SecurityFields, SecurityHeaders, SignablePayload,
};
use crate::protocol::context::SecurityContext;
use crate::protocol::env::ProtocolEnv;
use crate::protocol::request::RequestOptions;
use crate::types::ProtocolError;

/// What gets sealed and under which binding.
pub(crate) struct SealParams<'a> {
    pub key: &'a SymmetricKey,
    pub url: &'a str,
    pub app_id: &'a str,
    pub sym_sn: &'a str,
    pub timestamp: i64,
}

/// Inject the security fields into `body`, encrypt the canonical JSON and
/// return the serialized `{iv,data,authtag}` container.
pub(crate) fn seal_record(
    env: &ProtocolEnv,
    params: &SealParams<'_>,
    body: &Map<String, Value>,
) -> Result<String, ProtocolError> {
    let security = SecurityFields {
        nonce: request_nonce(env.random.as_ref()),
        app_id: params.app_id.to_owned(),
        timestamp: params.timestamp,
    };
    let record = compose_plaintext(body, &security);
    let plaintext = Zeroizing::new(serialize_plaintext(&record)?);

    let aad = build_aad(params.url, params.app_id, params.timestamp, params.sym_sn);
    let sealed = encrypt(params.key.as_bytes(), &plaintext, &aad, env.random.as_ref())?;
    debug!(url = params.url, ts = params.timestamp, len = plaintext.len(), "sealed payload");

    Ok(CipherContainer::from_sealed(&sealed).to_json()?)
}

/// Outbound bodies must be JSON objects (or absent).
pub(crate) fn request_body(body: &Value) -> Result<Map<String, Value>, ProtocolError> {
    body_as_object(body).map_err(|e| match e {
        EnvelopeError::NotAnObject => ProtocolError::BodyNotObject,
        other => other.into(),
    })
}

/// Build the encrypted request envelope for `body`, stamped with the env clock.
pub fn encrypt_request(
    ctx: &SecurityContext,
    env: &ProtocolEnv,
    body: &Value,
) -> Result<RequestEnvelope, ProtocolError> {
    let body = request_body(body)?;
    let key = ctx.symmetric_key()?;
    let timestamp = env.now();

    let params = SealParams {
        key: &key,
        url: &ctx.url,
        app_id: &ctx.app_id,
        sym_sn: &ctx.sym_sn,
        timestamp,
    };
    let req_data = seal_record(env, &params, &body)?;
    Ok(RequestEnvelope { req_ts: timestamp, req_data })
}

/// Sign a request envelope and produce its transport headers.
pub fn sign_request(
    ctx: &SecurityContext,
    envelope: &RequestEnvelope,
) -> Result<SecurityHeaders, ProtocolError> {
    sign_with(&ctx.signing_key()?, ctx, envelope)
}

fn sign_with(
    private_key: &RsaPrivateKey,
    ctx: &SecurityContext,
    envelope: &RequestEnvelope,
) -> Result<SecurityHeaders, ProtocolError> {
    let payload = SignablePayload::for_request(&ctx.url, &ctx.app_id, envelope);
    let signature = sign(private_key, payload.as_bytes())?;

    Ok(SecurityHeaders {
        app_id: ctx.app_id.clone(),
        timestamp: envelope.req_ts,
        signature: STANDARD.encode(signature),
    })
}

/// Replace the body with the signed envelope and add the security headers.
///
/// Key material is resolved before anything is sealed, so a misconfigured
/// context fails without producing a partial envelope.
pub fn encrypt_and_sign(
    ctx: &SecurityContext,
    env: &ProtocolEnv,
    options: &RequestOptions,
) -> Result<RequestOptions, ProtocolError> {
    let private_key = ctx.signing_key()?;

    let envelope = encrypt_request(ctx, env, &options.body)?;
    let headers = sign_with(&private_key, ctx, &envelope)?;

    let mut out = options.clone();
    out.body = envelope.to_value()?;
    headers.apply(&env.headers, &mut out.headers);
    Ok(out)
}
