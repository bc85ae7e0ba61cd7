//! guard/rotation.rs
//! Certificate-rotation selection.
//!
//! During rollover the platform signs each response twice: with the current
//! key (`resp_sn`/`resp_sig`) and with the soon-to-expire one
//! (`resp_deprecated_sn`/`resp_deprecated_sig`). The verifier holds exactly
//! one serial and picks the matching signature before verifying anything.
//!
//! Policy:
//! - exact string equality, primary checked first;
//! - an empty serial (missing field) never matches;
//! - a deprecated match is accepted but flagged so the caller can rotate.

use crate::guard::types::GuardError;

/// Signatures offered by a response, keyed by serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialCandidates<'a> {
    pub primary_sn: &'a str,
    pub primary_sig: &'a str,
    pub deprecated_sn: &'a str,
    pub deprecated_sig: &'a str,
}

/// Which signature the verifier should check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySelection<'a> {
    Primary { signature: &'a str },
    /// Local certificate is about to expire and must be replaced.
    Deprecated { signature: &'a str },
    NoneMatched,
}

impl<'a> KeySelection<'a> {
    #[inline]
    pub fn signature(&self) -> Option<&'a str> {
        match *self {
            KeySelection::Primary { signature } | KeySelection::Deprecated { signature } => Some(signature),
            KeySelection::NoneMatched => None,
        }
    }

    #[inline]
    pub fn is_deprecated(&self) -> bool {
        matches!(self, KeySelection::Deprecated { .. })
    }
}

pub fn select_signature<'a>(expected_sn: &str, candidates: &SerialCandidates<'a>) -> KeySelection<'a> {
    if expected_sn.is_empty() {
        return KeySelection::NoneMatched;
    }
    if candidates.primary_sn == expected_sn {
        KeySelection::Primary { signature: candidates.primary_sig }
    } else if candidates.deprecated_sn == expected_sn {
        KeySelection::Deprecated { signature: candidates.deprecated_sig }
    } else {
        KeySelection::NoneMatched
    }
}

impl SerialCandidates<'_> {
    pub fn mismatch(&self, expected_sn: &str) -> GuardError {
        GuardError::SerialMismatch {
            expected: expected_sn.to_owned(),
            primary: self.primary_sn.to_owned(),
            deprecated: self.deprecated_sn.to_owned(),
        }
    }
}
