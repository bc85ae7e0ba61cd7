//! protocol/mod.rs
//! Orchestration of the secure exchange.
//!
//! Outbound: body -> sealed container -> `RequestEnvelope` -> signature headers.
//! Inbound:  `ResponseEnvelope` -> serial selection -> signature -> freshness
//!           and identity -> decrypt -> sealed-field re-check.
//!
//! Every operation is a synchronous function of its inputs plus the
//! collaborators in [`ProtocolEnv`]. Contexts are read-only, so one context
//! may serve concurrent calls.

pub mod error;
pub mod env;
pub mod context;
pub mod request;
pub mod outbound;
pub mod inbound;
pub mod peer;

pub use error::{ErrorCode, ErrorPayload};
pub use env::ProtocolEnv;
pub use context::SecurityContext;
pub use request::RequestOptions;
pub use outbound::{encrypt_and_sign, encrypt_request, sign_request};
pub use inbound::{check_and_decrypt, check_and_decrypt_raw};
pub use peer::{open_request, seal_response, sign_response, PeerContext, PeerSigner};
