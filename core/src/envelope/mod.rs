//! envelope/mod.rs
//! Wire envelopes for the encrypted open-platform API.
//!
//! Notes:
//! - `types` holds the serde shapes; `encode` builds outbound values,
//!   `decode` parses inbound ones and re-checks the decrypted security fields.
//! - Nothing here touches keys. Sealing and signing live in `crypto`,
//!   sequencing lives in `protocol`.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
