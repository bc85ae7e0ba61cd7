
/// Default open-platform API origin. Request URLs are `base_url + path`.
pub const DEFAULT_BASE_URL: &str = "https://api.weixin.qq.com";

/// Maximum accepted distance (seconds) between local time and a message timestamp.
/// The boundary itself is accepted: `|now - ts| == 300` passes, `301` fails.
pub const DEFAULT_FRESHNESS_WINDOW_SECS: u64 = 300;

/// Raw bytes behind the `_n` request nonce (base64, padding stripped).
pub const REQUEST_NONCE_LEN: usize = 16;

/// Security fields merged into every sealed plaintext.
pub mod fields {
    pub const NONCE: &str = "_n";
    pub const APP_ID: &str = "_appid";
    pub const TIMESTAMP: &str = "_timestamp";
}

/// Transport header names added to an outgoing request.
pub mod header_names {
    pub const APP_ID: &str = "X-Appid";
    pub const TIMESTAMP: &str = "X-TimeStamp";
    pub const SIGNATURE: &str = "X-Signature";

    /// Names the production platform expects for the same three headers.
    pub mod wechatmp {
        pub const APP_ID: &str = "Wechatmp-Appid";
        pub const TIMESTAMP: &str = "Wechatmp-TimeStamp";
        pub const SIGNATURE: &str = "Wechatmp-Signature";
    }
}

/// Separators for the two derived byte strings.
pub const AAD_SEPARATOR: char = '|';
pub const SIGNABLE_SEPARATOR: char = '\n';
