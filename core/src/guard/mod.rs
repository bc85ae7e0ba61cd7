//! guard/mod.rs
//! Freshness, identity and key-rotation checks shared by both directions.
//!
//! - Freshness: `|now - ts| <= window` bounds the replay window.
//! - Identity: the app id a message claims must be the configured one.
//! - Rotation: choose which server signature to verify before verifying it.

pub mod types;
pub mod clock;
pub mod freshness;
pub mod rotation;

pub use types::*;
pub use clock::*;
pub use freshness::*;
pub use rotation::*;
