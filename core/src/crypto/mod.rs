pub mod types;
pub mod aad;
pub mod aead;
pub mod keys;
pub mod nonce;
pub mod sign;

pub use types::*;
pub use aad::*;
pub use aead::{AeadCodec, decrypt, encrypt};
pub use keys::*;
pub use nonce::*;
pub use sign::{sign, verify};
