//! envelope/encode.rs
//!
//! Outbound envelope building.
//!
//! Design notes:
//! - The caller's body is never mutated: a new record is built from the body
//!   plus the security fields, and the security fields win on name clashes.
//! - Plaintext is compact JSON with sorted keys (serde_json's default map),
//!   so equal inputs always produce equal bytes.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{Map, Value};

use crate::constants::fields;
use crate::crypto::types::Sealed;
use crate::envelope::types::{
    CipherContainer, EnvelopeError, HeaderNames, RequestEnvelope, ResponseEnvelope, SecurityFields,
    SecurityHeaders,
};

/// View a request body as a JSON object. `null` (no body) is an empty object.
pub fn body_as_object(body: &Value) -> Result<Map<String, Value>, EnvelopeError> {
    match body {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map.clone()),
        _ => Err(EnvelopeError::NotAnObject),
    }
}

/// Merge the security fields over a copy of `body`.
pub fn compose_plaintext(body: &Map<String, Value>, security: &SecurityFields) -> Map<String, Value> {
    let mut out = body.clone();
    out.insert(fields::NONCE.to_owned(), Value::String(security.nonce.clone()));
    out.insert(fields::APP_ID.to_owned(), Value::String(security.app_id.clone()));
    out.insert(fields::TIMESTAMP.to_owned(), Value::from(security.timestamp));
    out
}

#[inline]
pub fn serialize_plaintext(record: &Map<String, Value>) -> Result<Vec<u8>, EnvelopeError> {
    Ok(serde_json::to_vec(record)?)
}

impl CipherContainer {
    pub fn from_sealed(sealed: &Sealed) -> Self {
        Self {
            iv: STANDARD.encode(sealed.iv),
            data: STANDARD.encode(&sealed.ciphertext),
            authtag: STANDARD.encode(sealed.tag),
        }
    }

    /// Serialized form placed in `req_data` / `resp_data`.
    #[inline]
    pub fn to_json(&self) -> Result<String, EnvelopeError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl RequestEnvelope {
    pub fn new(req_ts: i64, container: &CipherContainer) -> Result<Self, EnvelopeError> {
        Ok(Self {
            req_ts,
            req_data: container.to_json()?,
        })
    }

    #[inline]
    pub fn to_value(&self) -> Result<Value, EnvelopeError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl ResponseEnvelope {
    #[inline]
    pub fn to_value(&self) -> Result<Value, EnvelopeError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl SecurityHeaders {
    /// Write the three headers into `headers`. Existing entries with the same
    /// name in any ASCII case are dropped first.
    pub fn apply(&self, names: &HeaderNames, headers: &mut BTreeMap<String, String>) {
        let mut set = |name: &str, value: String| {
            headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
            headers.insert(name.to_owned(), value);
        };
        set(&names.app_id, self.app_id.clone());
        set(&names.timestamp, self.timestamp.to_string());
        set(&names.signature, self.signature.clone());
    }
}
