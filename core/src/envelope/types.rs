//! envelope/types.rs
//! Wire-level shapes exchanged with the open platform.
//!
//! Request body:  `{ "req_ts": <int>, "req_data": "<JSON of {iv,data,authtag}>" }`
//! Response body: `{ resp_appid, resp_ts, resp_sn, resp_sig,
//!                   resp_deprecated_sn, resp_deprecated_sig, resp_data }`
//!
//! `req_data` / `resp_data` are JSON *strings*: the exact characters are part
//! of the signed payload, so they are carried verbatim and never re-encoded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{header_names, SIGNABLE_SEPARATOR};
use crate::guard::rotation::SerialCandidates;

/// AES-GCM output as carried on the wire, every field standard base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherContainer {
    pub iv: String,
    pub data: String,
    pub authtag: String,
}

/// Container after base64 decoding; lengths are checked by the AEAD codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContainer {
    pub iv: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub tag: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub req_ts: i64,
    pub req_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub resp_appid: String,
    pub resp_ts: i64,
    pub resp_sn: String,
    pub resp_sig: String,
    #[serde(default)]
    pub resp_deprecated_sn: String,
    #[serde(default)]
    pub resp_deprecated_sig: String,
    pub resp_data: String,
}

impl ResponseEnvelope {
    #[inline]
    pub fn serial_candidates(&self) -> SerialCandidates<'_> {
        SerialCandidates {
            primary_sn: &self.resp_sn,
            primary_sig: &self.resp_sig,
            deprecated_sn: &self.resp_deprecated_sn,
            deprecated_sig: &self.resp_deprecated_sig,
        }
    }
}

/// The exact byte sequence that is signed and verified:
/// `url \n appId \n timestamp \n data`. Recomputed per call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignablePayload(String);

impl SignablePayload {
    pub fn new(url: &str, app_id: &str, timestamp: i64, data: &str) -> Self {
        let mut s = String::with_capacity(url.len() + app_id.len() + data.len() + 24);
        s.push_str(url);
        s.push(SIGNABLE_SEPARATOR);
        s.push_str(app_id);
        s.push(SIGNABLE_SEPARATOR);
        s.push_str(&timestamp.to_string());
        s.push(SIGNABLE_SEPARATOR);
        s.push_str(data);
        Self(s)
    }

    pub fn for_request(url: &str, app_id: &str, envelope: &RequestEnvelope) -> Self {
        Self::new(url, app_id, envelope.req_ts, &envelope.req_data)
    }

    /// Uses the responder's claimed app id, as the platform signs it.
    pub fn for_response(url: &str, envelope: &ResponseEnvelope) -> Self {
        Self::new(url, &envelope.resp_appid, envelope.resp_ts, &envelope.resp_data)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// `_n`, `_appid`, `_timestamp` injected into every sealed plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityFields {
    pub nonce: String,
    pub app_id: String,
    pub timestamp: i64,
}

/// Names of the three transport headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderNames {
    pub app_id: String,
    pub timestamp: String,
    pub signature: String,
}

impl Default for HeaderNames {
    fn default() -> Self {
        Self {
            app_id: header_names::APP_ID.to_owned(),
            timestamp: header_names::TIMESTAMP.to_owned(),
            signature: header_names::SIGNATURE.to_owned(),
        }
    }
}

impl HeaderNames {
    /// Header names used by the production platform.
    pub fn wechatmp() -> Self {
        Self {
            app_id: header_names::wechatmp::APP_ID.to_owned(),
            timestamp: header_names::wechatmp::TIMESTAMP.to_owned(),
            signature: header_names::wechatmp::SIGNATURE.to_owned(),
        }
    }
}

/// Values of the three transport headers (signature is base64).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityHeaders {
    pub app_id: String,
    pub timestamp: i64,
    pub signature: String,
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field `{field}` is not valid base64: {reason}")]
    Base64 { field: &'static str, reason: String },

    #[error("missing or invalid field `{0}`")]
    MissingField(&'static str),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("missing header `{0}`")]
    MissingHeader(String),

    #[error("invalid header `{name}`: {value}")]
    InvalidHeader { name: String, value: String },
}
