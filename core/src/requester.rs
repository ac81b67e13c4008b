//! The shared request/response pipeline.
//!
//! # Design
//! `Requester` is built once per [`LetoClient`] and shared by every resource
//! through an `Arc`. It owns no mutable state: each call builds an
//! [`HttpRequest`] (base URL, query, the two authentication headers, JSON
//! body), hands it to the [`Transport`], and runs the response through
//! [`decode_response`]. GET requests go through the [`RetryPolicy`]; other
//! verbs are sent exactly once.
//!
//! [`LetoClient`]: crate::LetoClient

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope::{decode_response, decode_unit, Envelope};
use crate::error::LetoError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::retry::RetryPolicy;

pub const TENANT_HEADER: &str = "X-Tenant-ID";
pub const TOKEN_HEADER: &str = "X-Service-Token";

/// Per-call overrides passed through to the transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
}

/// Builds, sends and decodes requests against one LETO endpoint.
pub struct Requester {
    base_url: String,
    tenant_id: String,
    service_token: String,
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl Requester {
    pub fn new(
        base_url: &str,
        tenant_id: &str,
        service_token: &str,
        transport: Arc<dyn Transport>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant_id: tenant_id.to_string(),
            service_token: service_token.to_string(),
            transport,
            retry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Build the plain-data request for `method` on `path`.
    pub fn build(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
        options: RequestOptions,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (TENANT_HEADER.to_string(), self.tenant_id.clone()),
                (TOKEN_HEADER.to_string(), self.service_token.clone()),
            ],
            body,
            timeout: options.timeout,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Envelope<T>, LetoError> {
        self.send(HttpMethod::Get, path, query, None, RequestOptions::default())
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Envelope<T>, LetoError> {
        let body = body.map(encode_body).transpose()?;
        self.send(HttpMethod::Post, path, Vec::new(), body, RequestOptions::default())
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Envelope<T>, LetoError> {
        let body = body.map(encode_body).transpose()?;
        self.send(HttpMethod::Put, path, Vec::new(), body, RequestOptions::default())
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Envelope<T>, LetoError> {
        let body = body.map(encode_body).transpose()?;
        self.send(HttpMethod::Patch, path, Vec::new(), body, RequestOptions::default())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, LetoError> {
        self.send(HttpMethod::Delete, path, Vec::new(), None, RequestOptions::default())
            .await
    }

    /// Send a request with explicit overrides and decode its envelope.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
        options: RequestOptions,
    ) -> Result<Envelope<T>, LetoError> {
        let request = self.build(method, path, query, body, options);
        if method == HttpMethod::Get {
            let description = format!("{method} {path}");
            self.retry
                .run(&description, || self.execute(request.clone()))
                .await
        } else {
            self.execute(request).await
        }
    }

    /// DELETE whose success body carries nothing the caller needs. A 2xx
    /// answer is accepted whatever its body (including 204 No Content).
    pub async fn delete_unit(&self, path: &str) -> Result<(), LetoError> {
        let request = self.build(
            HttpMethod::Delete,
            path,
            Vec::new(),
            None,
            RequestOptions::default(),
        );
        decode_unit(self.round_trip(request).await?)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<Envelope<T>, LetoError> {
        decode_response(self.round_trip(request).await?)
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, LetoError> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let response = self.transport.execute(request).await.map_err(|err| {
            tracing::debug!(%method, %url, error = %err, "transport failure");
            LetoError::Transport(err)
        })?;

        tracing::debug!(%method, %url, status = response.status, "received response");
        Ok(response)
    }
}

impl fmt::Debug for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requester")
            .field("base_url", &self.base_url)
            .field("tenant_id", &self.tenant_id)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String, LetoError> {
    serde_json::to_string(body).map_err(|e| LetoError::Serialization(e.to_string()))
}

/// Serialize a query struct into `(name, value)` pairs, sorted by name.
///
/// `None` fields are skipped; scalars are rendered without JSON quoting.
pub fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>, LetoError> {
    let value = serde_json::to_value(query).map_err(|e| LetoError::Serialization(e.to_string()))?;
    let serde_json::Value::Object(map) = value else {
        return Err(LetoError::Serialization(
            "query parameters must serialize to an object".to_string(),
        ));
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}
