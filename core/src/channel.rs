//! channel.rs
//! Request/response interceptors for a transport.
//!
//! A `SecureChannel` sits between business code and the HTTP client. Only
//! endpoints flagged `encrypted` are touched, and only when the config
//! carries a signature block; everything else passes through unchanged.

use serde_json::Value;
use tracing::debug;

use crate::config::SecurityConfig;
use crate::envelope::types::EnvelopeError;
use crate::protocol::context::SecurityContext;
use crate::protocol::env::ProtocolEnv;
use crate::protocol::error::ErrorPayload;
use crate::protocol::inbound::check_and_decrypt_raw;
use crate::protocol::outbound::encrypt_and_sign;
use crate::protocol::request::RequestOptions;
use crate::types::ProtocolError;

/// One API operation as the transport knows it. The HTTP method travels on
/// [`RequestOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub encrypted: bool,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), encrypted: false }
    }

    /// Endpoint that requires the secure channel.
    pub fn encrypted(path: impl Into<String>) -> Self {
        Self { path: path.into(), encrypted: true }
    }
}

#[derive(Debug, Clone)]
pub struct SecureChannel {
    config: SecurityConfig,
    env: ProtocolEnv,
}

impl SecureChannel {
    /// System clock and OS randomness; window and header names from `config`.
    pub fn new(config: SecurityConfig) -> Self {
        let env = ProtocolEnv::system()
            .with_window(config.window())
            .with_headers(config.headers.clone());
        Self { config, env }
    }

    pub fn with_env(config: SecurityConfig, env: ProtocolEnv) -> Self {
        Self { config, env }
    }

    #[inline]
    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    #[inline]
    pub fn env(&self) -> &ProtocolEnv {
        &self.env
    }

    /// Context for `endpoint` when the secure channel applies to it.
    fn context(&self, endpoint: &Endpoint) -> Option<SecurityContext> {
        if !endpoint.encrypted {
            return None;
        }
        self.config.context_for(&endpoint.path)
    }

    pub fn is_secured(&self, endpoint: &Endpoint) -> bool {
        endpoint.encrypted && self.config.signature.is_some()
    }

    /// Encrypt and sign `options` for a secured endpoint, pass it through
    /// otherwise.
    pub fn intercept_request(
        &self,
        endpoint: &Endpoint,
        options: &RequestOptions,
    ) -> Result<RequestOptions, ProtocolError> {
        match self.context(endpoint) {
            Some(ctx) => encrypt_and_sign(&ctx, &self.env, options),
            None => {
                debug!(path = %endpoint.path, "plain request");
                Ok(options.clone())
            }
        }
    }

    /// Decrypt a secured endpoint's response body into the business object,
    /// or into a serialized [`ErrorPayload`] when any check fails.
    pub fn transform_response(&self, endpoint: &Endpoint, raw_body: &str) -> Value {
        match self.context(endpoint) {
            Some(ctx) => match check_and_decrypt_raw(&ctx, &self.env, raw_body) {
                Ok(record) => Value::Object(record),
                Err(payload) => payload.to_value(),
            },
            None => serde_json::from_str(raw_body).unwrap_or_else(|e| {
                ErrorPayload::from(ProtocolError::from(EnvelopeError::Json(e))).to_value()
            }),
        }
    }
}
