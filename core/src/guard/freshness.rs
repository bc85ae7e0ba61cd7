//! guard/freshness.rs
//! Replay-window and identity checks.
//!
//! The window is symmetric: a message dated too far in the future is as
//! stale as one dated too far in the past. The boundary itself is accepted.

use crate::constants::DEFAULT_FRESHNESS_WINDOW_SECS;
use crate::guard::types::GuardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessWindow {
    max_skew_secs: u64,
}

impl Default for FreshnessWindow {
    fn default() -> Self {
        Self { max_skew_secs: DEFAULT_FRESHNESS_WINDOW_SECS }
    }
}

impl FreshnessWindow {
    pub const fn new(max_skew_secs: u64) -> Self {
        Self { max_skew_secs }
    }

    #[inline]
    pub fn secs(&self) -> u64 {
        self.max_skew_secs
    }

    /// Accept iff `|now - ts| <= window`.
    #[inline]
    pub fn check(&self, now: i64, ts: i64) -> Result<(), GuardError> {
        if now.abs_diff(ts) > self.max_skew_secs {
            return Err(GuardError::Stale {
                ts,
                now,
                window_secs: self.max_skew_secs,
            });
        }
        Ok(())
    }
}

/// The app id carried by a message must equal the locally configured one.
#[inline]
pub fn check_identity(expected: &str, actual: &str) -> Result<(), GuardError> {
    if expected != actual {
        return Err(GuardError::IdentityMismatch {
            expected: expected.to_owned(),
            actual: actual.to_owned(),
        });
    }
    Ok(())
}
