//! Error types for the LETO client.
//!
//! # Design
//! Every operation returns [`LetoError`]. The variants keep the two failure
//! shapes of the API apart while sharing one type:
//!
//! - `Api`: the server answered non-2xx with a recognizable envelope body.
//!   [`ApiError`] exposes code, message, HTTP status, timestamp and payload.
//! - `Http`: the server answered non-2xx with something else (a gateway
//!   HTML page, an empty body). Status and raw body are kept untouched.
//! - `Transport`: no response at all. The underlying error is preserved as
//!   the `source()` and can be downcast.

use std::error::Error as StdError;

use serde_json::Value;
use thiserror::Error;

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum LetoError {
    /// Required configuration is missing or malformed. Raised before any
    /// network traffic.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The server returned a non-2xx status with an envelope body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server returned a non-2xx status without an envelope body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl LetoError {
    /// The structured API error, if this is one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            LetoError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of the failed response, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            LetoError::Api(err) => Some(err.status),
            LetoError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transport failures and 5xx responses may succeed on a later attempt;
    /// 4xx responses and local failures never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            LetoError::Transport(_) => true,
            LetoError::Api(_) | LetoError::Http { .. } => {
                self.status().is_some_and(|s| (500..600).contains(&s))
            }
            LetoError::Config(_)
            | LetoError::Deserialization(_)
            | LetoError::Serialization(_) => false,
        }
    }
}

/// Error decoded from the envelope of a failed response.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("LETO API error {code} (HTTP {status}): {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub status: u16,
    pub timestamp: String,
    pub data: Value,
    pub success: bool,
}

/// A failure below HTTP: connect, TLS, timeout, body read.
#[derive(Debug, Error)]
#[error("transport error: {source}")]
pub struct TransportError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl TransportError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Borrow the underlying error as a concrete type.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.source
    }

    /// True when the underlying reqwest error was a timeout.
    pub fn is_timeout(&self) -> bool {
        self.downcast_ref::<reqwest::Error>()
            .is_some_and(reqwest::Error::is_timeout)
    }
}
