//! config.rs
//! SDK configuration: app identity, base URL and the optional signature block.
//!
//! JSON keys are camelCase. `signature` may be omitted, `null` or `false` to
//! disable encryption for every endpoint.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer};
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_FRESHNESS_WINDOW_SECS};
use crate::crypto::keys::{load_private_key, load_verifying_key, SymmetricKey};
use crate::envelope::types::HeaderNames;
use crate::guard::freshness::FreshnessWindow;
use crate::protocol::context::SecurityContext;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Key material for encrypted endpoints.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureConfig {
    pub sym_key: String,
    pub sym_sn: String,
    pub private_sn: String,
    pub private_key: String,
    pub certificate: String,
}

impl fmt::Debug for SignatureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureConfig")
            .field("sym_sn", &self.sym_sn)
            .field("private_sn", &self.private_sn)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityConfig {
    pub app_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, deserialize_with = "signature_or_false")]
    pub signature: Option<SignatureConfig>,
    #[serde(default = "default_window_secs")]
    pub freshness_window_secs: u64,
    #[serde(default)]
    pub headers: HeaderNames,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_window_secs() -> u64 {
    DEFAULT_FRESHNESS_WINDOW_SECS
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignatureSetting {
    Flag(bool),
    Block(SignatureConfig),
}

fn signature_or_false<'de, D>(deserializer: D) -> Result<Option<SignatureConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<SignatureSetting>::deserialize(deserializer)? {
        None | Some(SignatureSetting::Flag(false)) => Ok(None),
        Some(SignatureSetting::Flag(true)) => {
            Err(de::Error::custom("`signature: true` is not a signature block"))
        }
        Some(SignatureSetting::Block(block)) => Ok(Some(block)),
    }
}

impl SecurityConfig {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            base_url: default_base_url(),
            signature: None,
            freshness_window_secs: DEFAULT_FRESHNESS_WINDOW_SECS,
            headers: HeaderNames::default(),
        }
    }

    pub fn with_signature(mut self, signature: SignatureConfig) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parse and validate.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Reject configs that could only fail later, per request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::Invalid("appId must not be empty".into()));
        }
        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid("baseUrl must not be empty".into()));
        }
        let Some(sig) = &self.signature else {
            return Ok(());
        };

        SymmetricKey::from_base64(&sig.sym_key)
            .map_err(|e| ConfigError::Invalid(format!("signature.symKey: {e}")))?;
        load_private_key(&sig.private_key)
            .map_err(|e| ConfigError::Invalid(format!("signature.privateKey: {e}")))?;
        load_verifying_key(&sig.certificate)
            .map_err(|e| ConfigError::Invalid(format!("signature.certificate: {e}")))?;
        if sig.private_sn.is_empty() {
            return Err(ConfigError::Invalid("signature.privateSn must not be empty".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn window(&self) -> FreshnessWindow {
        FreshnessWindow::new(self.freshness_window_secs)
    }

    #[inline]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Security context for one API path; `None` when no signature block is set.
    pub fn context_for(&self, path: &str) -> Option<SecurityContext> {
        let sig = self.signature.as_ref()?;
        Some(SecurityContext {
            sym_key: sig.sym_key.clone(),
            sym_sn: sig.sym_sn.clone(),
            private_sn: sig.private_sn.clone(),
            private_key: sig.private_key.clone(),
            certificate: sig.certificate.clone(),
            app_id: self.app_id.clone(),
            url: self.url_for(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = SecurityConfig::from_json_str(r#"{"appId":"wx123"}"#).unwrap();
        assert_eq!(config.base_url, "https://api.weixin.qq.com");
        assert_eq!(config.freshness_window_secs, 300);
        assert_eq!(config.headers, HeaderNames::default());
        assert!(config.signature.is_none());
        assert!(config.context_for("/x").is_none());
    }

    #[test]
    fn signature_false_disables() {
        let config = SecurityConfig::from_json_str(r#"{"appId":"wx123","signature":false}"#).unwrap();
        assert!(config.signature.is_none());

        let err = SecurityConfig::from_json_str(r#"{"appId":"wx123","signature":true}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn empty_app_id_rejected() {
        let err = SecurityConfig::from_json_str(r#"{"appId":"  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn short_sym_key_rejected() {
        let raw = r#"{
            "appId": "wx123",
            "signature": {
                "symKey": "c2hvcnQ=",
                "symSn": "s1",
                "privateSn": "p1",
                "privateKey": "",
                "certificate": ""
            }
        }"#;
        let err = SecurityConfig::from_json_str(raw).unwrap_err();
        assert!(err.to_string().contains("symKey"));
    }

    #[test]
    fn url_is_base_plus_path() {
        let config = SecurityConfig::new("wx123").with_base_url("https://api.example.com");
        assert_eq!(config.url_for("/x"), "https://api.example.com/x");
    }

    #[test]
    fn missing_file_is_io() {
        let err = SecurityConfig::from_file("/nonexistent/apisec.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
