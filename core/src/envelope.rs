//! The response envelope and the error translator.
//!
//! Every LETO response body, success or failure, has the same shape:
//!
//! ```json
//! {"code":"SUCCESS","message":"OK","data":{},"timestamp":"…","success":true,
//!  "pagination":{"page":1,"size":10,"total":37,"totalPages":4}}
//! ```
//!
//! [`decode_response`] turns a raw [`HttpResponse`] into either the decoded
//! envelope or the matching [`LetoError`] variant.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, LetoError};
use crate::http::HttpResponse;

/// Uniform wrapper around every response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: String,
    pub message: String,
    pub data: T,
    pub timestamp: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    /// Apply `f` to the payload, keeping the envelope metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            code: self.code,
            message: self.message,
            data: f(self.data),
            timestamp: self.timestamp,
            success: self.success,
            pagination: self.pagination,
        }
    }
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// Envelope of a failed response. The payload is kept as raw JSON since
/// error bodies carry arbitrary detail.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    code: String,
    message: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    timestamp: String,
    success: bool,
}

impl ErrorEnvelope {
    fn into_api_error(self, status: u16) -> ApiError {
        ApiError {
            code: self.code,
            message: self.message,
            status,
            timestamp: self.timestamp,
            data: self.data,
            success: self.success,
        }
    }
}

/// Decode a response into an envelope, or translate the failure.
///
/// - 2xx: the body must decode as `Envelope<T>`.
/// - non-2xx with an envelope body: [`LetoError::Api`].
/// - non-2xx with any other body: [`LetoError::Http`], body untouched.
pub fn decode_response<T: DeserializeOwned>(
    response: HttpResponse,
) -> Result<Envelope<T>, LetoError> {
    if !response.is_success() {
        return Err(translate_failure(response));
    }

    let envelope: Envelope<T> = serde_json::from_str(&response.body)
        .map_err(|e| LetoError::Deserialization(e.to_string()))?;
    if !envelope.success {
        tracing::warn!(
            status = response.status,
            code = %envelope.code,
            "2xx response carried success=false"
        );
    }
    Ok(envelope)
}

/// Check a response whose success body is ignored.
pub fn decode_unit(response: HttpResponse) -> Result<(), LetoError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(translate_failure(response))
    }
}

fn translate_failure(response: HttpResponse) -> LetoError {
    match serde_json::from_str::<ErrorEnvelope>(&response.body) {
        Ok(envelope) => LetoError::Api(envelope.into_api_error(response.status)),
        Err(_) => LetoError::Http {
            status: response.status,
            body: response.body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn decodes_success_with_pagination() {
        let body = r#"{"code":"SUCCESS","message":"OK","data":["a","b"],
            "timestamp":"2024-05-01T00:00:00Z","success":true,
            "pagination":{"page":1,"size":10,"total":37,"totalPages":4}}"#;
        let envelope: Envelope<Vec<String>> = decode_response(response(200, body)).unwrap();
        assert_eq!(envelope.data, vec!["a", "b"]);
        assert_eq!(
            envelope.pagination,
            Some(Pagination {
                page: 1,
                size: 10,
                total: 37,
                total_pages: 4
            })
        );
    }

    #[test]
    fn pagination_is_optional() {
        let body = r#"{"code":"SUCCESS","message":"OK","data":1,"timestamp":"t","success":true}"#;
        let envelope: Envelope<u32> = decode_response(response(200, body)).unwrap();
        assert!(envelope.pagination.is_none());
        assert_eq!(envelope.into_data(), 1);
    }

    #[test]
    fn envelope_failure_becomes_api_error() {
        let body = r#"{"code":"INSUFFICIENT_BALANCE","message":"Not enough balance",
            "data":{"required":"15000"},"timestamp":"2024-05-01T00:00:00Z","success":false}"#;
        let err = decode_response::<Value>(response(402, body)).unwrap_err();
        let api = err.api().expect("api error");
        assert_eq!(api.code, "INSUFFICIENT_BALANCE");
        assert_eq!(api.message, "Not enough balance");
        assert_eq!(api.status, 402);
        assert_eq!(api.timestamp, "2024-05-01T00:00:00Z");
        assert_eq!(api.data["required"], "15000");
        assert!(!api.success);
    }

    #[test]
    fn error_envelope_without_data_still_recognized() {
        let body = r#"{"code":"UNAUTHORIZED","message":"Invalid token","success":false}"#;
        let err = decode_response::<Value>(response(401, body)).unwrap_err();
        let api = err.api().unwrap();
        assert_eq!(api.data, Value::Null);
        assert_eq!(api.timestamp, "");
    }

    #[test]
    fn html_failure_is_passed_through() {
        let body = "<html><body>504 Gateway Time-out</body></html>";
        let err = decode_response::<Value>(response(504, body)).unwrap_err();
        match err {
            LetoError::Http { status, body: raw } => {
                assert_eq!(status, 504);
                assert_eq!(raw, body);
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[test]
    fn json_without_envelope_shape_is_passed_through() {
        let err = decode_response::<Value>(response(500, r#"{"error":"boom"}"#)).unwrap_err();
        assert!(matches!(err, LetoError::Http { status: 500, .. }));
    }

    #[test]
    fn mistyped_success_payload_is_a_decode_error() {
        let body = r#"{"code":"SUCCESS","message":"OK","data":"nope","timestamp":"t","success":true}"#;
        let err = decode_response::<Vec<String>>(response(200, body)).unwrap_err();
        assert!(matches!(err, LetoError::Deserialization(_)));
    }

    #[test]
    fn unit_decode_ignores_success_body() {
        assert!(decode_unit(response(204, "")).is_ok());
        assert!(decode_unit(response(200, "not json")).is_ok());
        assert!(matches!(
            decode_unit(response(502, "")),
            Err(LetoError::Http { status: 502, .. })
        ));
    }

    #[test]
    fn map_keeps_metadata() {
        let envelope = Envelope {
            code: "SUCCESS".to_string(),
            message: "OK".to_string(),
            data: 2,
            timestamp: "t".to_string(),
            success: true,
            pagination: None,
        };
        let mapped = envelope.map(|n| n * 10);
        assert_eq!(mapped.data, 20);
        assert_eq!(mapped.code, "SUCCESS");
    }
}
