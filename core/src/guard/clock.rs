//! guard/clock.rs
//! Wall-clock collaborator. Injected so freshness boundaries are testable
//! without sleeping.

use chrono::Utc;

pub trait Clock: Send + Sync {
    /// Current unix time in whole seconds.
    fn now_unix(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    #[inline]
    fn now_unix(&self) -> i64 {
        self.0
    }
}
