//! In-memory transport for unit tests.
//!
//! `MockTransport` records every request it receives and answers from a
//! queue of canned responses, so resource tests can assert the exact
//! method, URL, query and body a call produced.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::requester::Requester;
use crate::retry::RetryPolicy;

pub const BASE_URL: &str = "http://localhost:3000";

enum Canned {
    Response(HttpResponse),
    TransportError(String),
}

#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Canned>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_raw(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Canned::Response(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push_raw(status, &body.to_string());
    }

    /// Queue a successful envelope wrapping `data`.
    pub fn push_data(&self, data: Value) {
        self.push_json(200, envelope_body(data));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Canned::TransportError(message.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    /// Body of the last request parsed as JSON.
    pub fn last_body(&self) -> Value {
        let req = self.last_request();
        serde_json::from_str(req.body.as_deref().expect("request had no body")).unwrap()
    }

    /// Path of the last request with the base URL removed.
    pub fn last_path(&self) -> String {
        let req = self.last_request();
        req.url
            .strip_prefix(BASE_URL)
            .unwrap_or(&req.url)
            .to_string()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Canned::Response(response)) => Ok(response),
            Some(Canned::TransportError(message)) => Err(TransportError::new(message)),
            None => Err(TransportError::new("mock transport has no queued response")),
        }
    }
}

/// A success envelope around `data`.
pub fn envelope_body(data: Value) -> Value {
    json!({
        "code": "SUCCESS",
        "message": "OK",
        "data": data,
        "timestamp": "2024-05-01T09:00:00Z",
        "success": true
    })
}

/// A failure envelope as the API sends it on 4xx/5xx.
pub fn error_body(code: &str, message: &str) -> Value {
    json!({
        "code": code,
        "message": message,
        "data": null,
        "timestamp": "2024-05-01T09:00:00Z",
        "success": false
    })
}

/// A requester wired to `mock` with retries disabled.
pub fn requester(mock: &Arc<MockTransport>) -> Arc<Requester> {
    Arc::new(Requester::new(
        BASE_URL,
        "tenant-1",
        "token-1",
        mock.clone(),
        RetryPolicy::none(),
    ))
}
