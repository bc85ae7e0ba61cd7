use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// Timestamp outside the freshness window.
    #[error("stale message: ts={ts}, now={now}, window={window_secs}s")]
    Stale { ts: i64, now: i64, window_secs: u64 },

    /// Inner `_timestamp` disagrees with the envelope's outer timestamp.
    #[error("timestamp mismatch: envelope={outer}, payload={inner}")]
    TimestampMismatch { outer: i64, inner: i64 },

    /// App id claimed by the message differs from the configured one.
    #[error("app id mismatch: expected={expected}, actual={actual}")]
    IdentityMismatch { expected: String, actual: String },

    /// Neither the primary nor the deprecated serial matches the local one.
    #[error("serial mismatch: expected={expected}, primary={primary}, deprecated={deprecated}")]
    SerialMismatch {
        expected: String,
        primary: String,
        deprecated: String,
    },
}
