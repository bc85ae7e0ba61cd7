//! apisec-core
//!
//! Request/response security layer for the open-platform HTTP API.
//! Synchronous, pure Rust, no network I/O.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Primitives and checks
pub mod crypto;
pub mod guard;
pub mod envelope;

// Orchestration
pub mod protocol;
pub mod config;
pub mod channel;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::channel::{Endpoint, SecureChannel};
    pub use crate::config::{ConfigError, SecurityConfig, SignatureConfig};
    pub use crate::crypto::nonce::{OsRandom, RandomSource, SeededRandom};
    pub use crate::envelope::types::{HeaderNames, RequestEnvelope, ResponseEnvelope};
    pub use crate::guard::clock::{Clock, FixedClock, SystemClock};
    pub use crate::guard::freshness::FreshnessWindow;
    pub use crate::protocol::{
        check_and_decrypt, check_and_decrypt_raw, encrypt_and_sign, open_request, seal_response,
        ErrorCode, ErrorPayload, PeerContext, PeerSigner, ProtocolEnv, RequestOptions, SecurityContext,
    };
    pub use crate::types::ProtocolError;
}
