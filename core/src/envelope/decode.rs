//! envelope/decode.rs
//!
//! Inbound envelope parsing and the inner re-check.
//!
//! Design notes:
//! - The ciphertext container is parsed from the envelope's string field.
//! - After decryption the injected `_n`/`_appid`/`_timestamp` are checked
//!   again against local state; the outer fields alone are not trusted.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{Map, Value};

use crate::constants::fields;
use crate::envelope::types::{
    CipherContainer, DecodedContainer, EnvelopeError, HeaderNames, RequestEnvelope, ResponseEnvelope,
    SecurityFields, SecurityHeaders,
};
use crate::guard::freshness::{check_identity, FreshnessWindow};
use crate::guard::types::GuardError;

fn decode_b64(field: &'static str, value: &str) -> Result<Vec<u8>, EnvelopeError> {
    STANDARD.decode(value).map_err(|e| EnvelopeError::Base64 {
        field,
        reason: e.to_string(),
    })
}

impl CipherContainer {
    #[inline]
    pub fn from_json(raw: &str) -> Result<Self, EnvelopeError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn decode(&self) -> Result<DecodedContainer, EnvelopeError> {
        Ok(DecodedContainer {
            iv: decode_b64("iv", &self.iv)?,
            ciphertext: decode_b64("data", &self.data)?,
            tag: decode_b64("authtag", &self.authtag)?,
        })
    }
}

impl RequestEnvelope {
    #[inline]
    pub fn from_value(body: &Value) -> Result<Self, EnvelopeError> {
        Ok(serde_json::from_value(body.clone())?)
    }
}

impl ResponseEnvelope {
    #[inline]
    pub fn from_json(raw: &str) -> Result<Self, EnvelopeError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Decrypted bytes must be a UTF-8 JSON object.
pub fn parse_plaintext(plaintext: &[u8]) -> Result<Map<String, Value>, EnvelopeError> {
    match serde_json::from_slice::<Value>(plaintext)? {
        Value::Object(map) => Ok(map),
        _ => Err(EnvelopeError::NotAnObject),
    }
}

impl SecurityFields {
    /// Pull the injected fields out of a decrypted record.
    pub fn extract(record: &Map<String, Value>) -> Result<Self, EnvelopeError> {
        let nonce = record
            .get(fields::NONCE)
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .ok_or(EnvelopeError::MissingField(fields::NONCE))?;
        let app_id = record
            .get(fields::APP_ID)
            .and_then(Value::as_str)
            .ok_or(EnvelopeError::MissingField(fields::APP_ID))?;
        let timestamp = record
            .get(fields::TIMESTAMP)
            .and_then(Value::as_i64)
            .ok_or(EnvelopeError::MissingField(fields::TIMESTAMP))?;

        Ok(Self {
            nonce: nonce.to_owned(),
            app_id: app_id.to_owned(),
            timestamp,
        })
    }

    /// Inner re-check: identity, agreement with the outer timestamp, and
    /// freshness of the inner timestamp in its own right.
    pub fn check(
        &self,
        expected_app_id: &str,
        outer_ts: i64,
        now: i64,
        window: &FreshnessWindow,
    ) -> Result<(), GuardError> {
        check_identity(expected_app_id, &self.app_id)?;
        if self.timestamp != outer_ts {
            return Err(GuardError::TimestampMismatch {
                outer: outer_ts,
                inner: self.timestamp,
            });
        }
        window.check(now, self.timestamp)
    }
}

impl SecurityHeaders {
    /// Read the three headers back (counter-party side). Header names match
    /// ASCII case-insensitively.
    pub fn from_headers(
        names: &HeaderNames,
        headers: &BTreeMap<String, String>,
    ) -> Result<Self, EnvelopeError> {
        let get = |name: &str| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.clone())
                .ok_or_else(|| EnvelopeError::MissingHeader(name.to_owned()))
        };

        let app_id = get(&names.app_id)?;
        let raw_ts = get(&names.timestamp)?;
        let timestamp = raw_ts.trim().parse::<i64>().map_err(|_| EnvelopeError::InvalidHeader {
            name: names.timestamp.clone(),
            value: raw_ts.clone(),
        })?;
        let signature = get(&names.signature)?;

        Ok(Self { app_id, timestamp, signature })
    }
}
