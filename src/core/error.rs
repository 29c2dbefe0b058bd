//! Errors raised while talking to the pool controller.

use crate::constants;
use thiserror::Error;

/// Errors that can occur when calling the controller's JSON-RPC API.
#[derive(Debug, Error)]
pub enum XapiError {
    /// Transport-level failure (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The controller rejected the call, e.g. `SESSION_AUTHENTICATION_FAILED`.
    #[error("{code}{}", render_params(.params))]
    Failure { code: String, params: Vec<String> },

    /// The response was valid JSON but not a JSON-RPC reply we understand.
    #[error("malformed response: {0}")]
    Protocol(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid controller address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
}

impl XapiError {
    /// The controller failure code, if this is a controller failure.
    pub fn failure_code(&self) -> Option<&str> {
        match self {
            XapiError::Failure { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Master address carried by a `HOST_IS_SLAVE` failure.
    pub fn pool_master(&self) -> Option<&str> {
        if self.failure_code() != Some(constants::HOST_IS_SLAVE) {
            return None;
        }
        match self {
            XapiError::Failure { params, .. } => {
                params.first().map(String::as_str).filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }
}

fn render_params(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!(": {}", params.join(", "))
    }
}
