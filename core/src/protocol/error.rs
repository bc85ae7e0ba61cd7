//! protocol/error.rs
//! Structured failure returned by the inbound path instead of an error type,
//! so business code can branch on `errcode` without error plumbing.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ProtocolError;
use crate::utils::enum_name_or_hex;

/// Machine-readable failure codes (`errcode`).
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum ErrorCode {
    SignatureInvalid  = -1,
    AuthTagMismatch   = -2,
    SerialMismatch    = -3,
    StaleMessage      = -4,
    IdentityMismatch  = -5,
    KeyFormat         = -6,
    MalformedEnvelope = -7,
    BodyNotObject     = -8,
    CryptoFailure     = -9,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub errcode: i32,
    pub errmsg: String,
}

impl ErrorPayload {
    #[inline]
    pub fn code(&self) -> Option<ErrorCode> {
        ErrorCode::try_from(self.errcode).ok()
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "errcode": self.errcode,
            "errmsg": self.errmsg,
        })
    }
}

impl From<&ProtocolError> for ErrorPayload {
    fn from(e: &ProtocolError) -> Self {
        Self {
            errcode: e.code().into(),
            errmsg: e.to_string(),
        }
    }
}

impl From<ProtocolError> for ErrorPayload {
    fn from(e: ProtocolError) -> Self {
        Self::from(&e)
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            enum_name_or_hex::<ErrorCode>(self.errcode),
            self.errcode,
            self.errmsg
        )
    }
}
