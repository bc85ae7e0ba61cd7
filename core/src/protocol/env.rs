//! protocol/env.rs
//! Collaborators every protocol call reads: clock, randomness, freshness
//! window and header names. Read-only, shareable across threads.

use std::fmt;
use std::sync::Arc;

use crate::crypto::nonce::{OsRandom, RandomSource};
use crate::envelope::types::HeaderNames;
use crate::guard::clock::{Clock, SystemClock};
use crate::guard::freshness::FreshnessWindow;

#[derive(Clone)]
pub struct ProtocolEnv {
    pub clock: Arc<dyn Clock>,
    pub random: Arc<dyn RandomSource>,
    pub window: FreshnessWindow,
    pub headers: HeaderNames,
}

impl ProtocolEnv {
    /// OS randomness, system clock, 300 s window, `X-*` headers.
    pub fn system() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            random: Arc::new(OsRandom),
            window: FreshnessWindow::default(),
            headers: HeaderNames::default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Arc::new(random);
        self
    }

    pub fn with_window(mut self, window: FreshnessWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_headers(mut self, headers: HeaderNames) -> Self {
        self.headers = headers;
        self
    }

    #[inline]
    pub fn now(&self) -> i64 {
        self.clock.now_unix()
    }
}

impl Default for ProtocolEnv {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for ProtocolEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolEnv")
            .field("window", &self.window)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
