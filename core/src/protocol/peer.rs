//! protocol/peer.rs
//! The platform side of the exchange: open signed requests, seal and sign
//! responses. Used by mock servers and end-to-end tests.
//!
//! During certificate rollover the platform signs every response with both
//! its current key and the deprecated one, so callers still pinned to the
//! old serial keep verifying.

use std::collections::BTreeMap;
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::crypto::keys::{load_private_key, load_verifying_key, SymmetricKey};
use crate::crypto::sign::{sign, verify};
use crate::envelope::types::{RequestEnvelope, ResponseEnvelope, SecurityHeaders, SignablePayload};
use crate::guard::freshness::check_identity;
use crate::guard::types::GuardError;
use crate::protocol::env::ProtocolEnv;
use crate::protocol::inbound::{decode_signature, open_record, OpenParams};
use crate::protocol::outbound::{request_body, seal_record, SealParams};
use crate::types::ProtocolError;

/// A platform signing key and the serial it is published under.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerSigner {
    pub sn: String,
    /// RSA private key, PEM.
    pub private_key: String,
}

impl fmt::Debug for PeerSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerSigner")
            .field("sn", &self.sn)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerContext {
    pub app_id: String,
    pub url: String,
    pub sym_key: String,
    pub sym_sn: String,
    /// The calling app's public key (or certificate), PEM.
    pub app_public_key: String,
    pub primary: PeerSigner,
    #[serde(default)]
    pub deprecated: Option<PeerSigner>,
}

impl PeerContext {
    #[inline]
    pub fn symmetric_key(&self) -> Result<SymmetricKey, ProtocolError> {
        Ok(SymmetricKey::from_base64(&self.sym_key)?)
    }

    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self { url: url.into(), ..self.clone() }
    }
}

/// Verify and decrypt a request produced by `encrypt_and_sign`.
///
/// `headers` are the transport headers as received; their names follow
/// `env.headers`.
pub fn open_request(
    peer: &PeerContext,
    env: &ProtocolEnv,
    envelope: &RequestEnvelope,
    headers: &BTreeMap<String, String>,
) -> Result<Map<String, Value>, ProtocolError> {
    let security = SecurityHeaders::from_headers(&env.headers, headers)?;
    check_identity(&peer.app_id, &security.app_id)?;
    if security.timestamp != envelope.req_ts {
        return Err(GuardError::TimestampMismatch {
            outer: envelope.req_ts,
            inner: security.timestamp,
        }
        .into());
    }

    let signature = decode_signature(&security.signature)?;
    let payload = SignablePayload::for_request(&peer.url, &peer.app_id, envelope);
    let app_key = load_verifying_key(&peer.app_public_key)?;
    if !verify(&app_key, payload.as_bytes(), &signature) {
        return Err(ProtocolError::SignatureInvalid);
    }

    let now = env.now();
    env.window.check(now, envelope.req_ts)?;

    let key = peer.symmetric_key()?;
    let params = OpenParams {
        key: &key,
        url: &peer.url,
        app_id: &peer.app_id,
        sym_sn: &peer.sym_sn,
        timestamp: envelope.req_ts,
    };
    let record = open_record(env, &params, &envelope.req_data, now)?;
    debug!(url = %peer.url, ts = envelope.req_ts, "opened request");
    Ok(record)
}

/// Seal `body` into a response envelope signed by the primary key, and by
/// the deprecated key when one is configured.
pub fn seal_response(
    peer: &PeerContext,
    env: &ProtocolEnv,
    body: &Value,
) -> Result<ResponseEnvelope, ProtocolError> {
    let body = request_body(body)?;
    let key = peer.symmetric_key()?;
    let timestamp = env.now();

    let params = SealParams {
        key: &key,
        url: &peer.url,
        app_id: &peer.app_id,
        sym_sn: &peer.sym_sn,
        timestamp,
    };
    let resp_data = seal_record(env, &params, &body)?;

    let unsigned = ResponseEnvelope {
        resp_appid: peer.app_id.clone(),
        resp_ts: timestamp,
        resp_sn: String::new(),
        resp_sig: String::new(),
        resp_deprecated_sn: String::new(),
        resp_deprecated_sig: String::new(),
        resp_data,
    };
    sign_response(peer, unsigned)
}

/// (Re)compute the serials and signatures of `envelope` from its current
/// `resp_appid`, `resp_ts` and `resp_data`.
pub fn sign_response(
    peer: &PeerContext,
    mut envelope: ResponseEnvelope,
) -> Result<ResponseEnvelope, ProtocolError> {
    let payload = SignablePayload::for_response(&peer.url, &envelope);
    let sign_b64 = |signer: &PeerSigner| -> Result<String, ProtocolError> {
        let private_key = load_private_key(&signer.private_key)?;
        Ok(STANDARD.encode(sign(&private_key, payload.as_bytes())?))
    };

    envelope.resp_sn = peer.primary.sn.clone();
    envelope.resp_sig = sign_b64(&peer.primary)?;
    match &peer.deprecated {
        Some(old) => {
            envelope.resp_deprecated_sn = old.sn.clone();
            envelope.resp_deprecated_sig = sign_b64(old)?;
        }
        None => {
            envelope.resp_deprecated_sn.clear();
            envelope.resp_deprecated_sig.clear();
        }
    }
    Ok(envelope)
}
