//! Async client for the LETO domain-registrar partner API.
//!
//! # Overview
//! [`LetoClient`] groups the API into resource handles (`account`,
//! `contacts`, `domains`, `transfers`, `tlds`, `transactions`). Every call
//! goes through one [`Requester`], which adds the tenant headers, sends the
//! request over a [`Transport`], and decodes the response [`Envelope`].
//!
//! # Design
//! - Requests and responses are plain data ([`HttpRequest`],
//!   [`HttpResponse`]). The network sits behind the [`Transport`] trait;
//!   [`ReqwestTransport`] is the default, tests swap in an in-memory one.
//! - Failures come back as one [`LetoError`]: [`LetoError::Api`] when the
//!   server sent an error envelope, [`LetoError::Http`] for any other
//!   non-2xx body, [`LetoError::Transport`] when no response arrived.
//! - GET requests are retried with exponential backoff on transport errors
//!   and 5xx; writes are sent once.
//! - Payload types are defined here, independent of the server; the
//!   integration tests against `mock-server` catch schema drift.
//!
//! ```no_run
//! use leto_core::{LetoClient, LetoConfig};
//!
//! # async fn run() -> Result<(), leto_core::LetoError> {
//! let client = LetoClient::new(LetoConfig::new("tenant-id", "service-token"))?;
//! let check = client.domains.check("example.kr").await?;
//! println!("available: {}", check.available);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod requester;
pub mod resources;
pub mod retry;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::LetoClient;
pub use config::LetoConfig;
pub use envelope::{Envelope, Pagination};
pub use error::{ApiError, LetoError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use requester::{RequestOptions, Requester};
pub use retry::RetryPolicy;
pub use types::*;
