use std::sync::Arc;

use crate::envelope::Envelope;
use crate::error::LetoError;
use crate::requester::Requester;
use crate::types::{
    Transfer, TransferAuthCodeVerifyRequest, TransferAuthCodeVerifyResult,
    TransferInitiateRequest, TransferListQuery,
};

use super::optional_query;

const TRANSFER_PATH: &str = "/api/v1/domains/transfer";

/// Inbound domain transfers.
///
/// A transfer usually goes: [`verify_auth_code`](Self::verify_auth_code),
/// then [`initiate`](Self::initiate), then [`get`](Self::get) until the
/// status is terminal.
#[derive(Debug, Clone)]
pub struct Transfers {
    http: Arc<Requester>,
}

impl Transfers {
    pub fn new(http: Arc<Requester>) -> Self {
        Self { http }
    }

    /// Ask the losing registrar whether `request.auth_code` is valid.
    pub async fn verify_auth_code(
        &self,
        request: &TransferAuthCodeVerifyRequest,
    ) -> Result<TransferAuthCodeVerifyResult, LetoError> {
        Ok(self
            .http
            .post(&format!("{TRANSFER_PATH}/auth-code/verify"), Some(request))
            .await?
            .data)
    }

    pub async fn initiate(&self, request: &TransferInitiateRequest) -> Result<Transfer, LetoError> {
        Ok(self.http.post(TRANSFER_PATH, Some(request)).await?.data)
    }

    pub async fn get(&self, transfer_id: &str) -> Result<Transfer, LetoError> {
        Ok(self
            .http
            .get(&format!("{TRANSFER_PATH}/{transfer_id}"), Vec::new())
            .await?
            .data)
    }

    pub async fn list(
        &self,
        query: Option<&TransferListQuery>,
    ) -> Result<Envelope<Vec<Transfer>>, LetoError> {
        self.http.get(TRANSFER_PATH, optional_query(query)?).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::http::HttpMethod;
    use crate::test_support::{envelope_body, error_body, requester, MockTransport};
    use crate::types::{TransferDirection, TransferStatus};

    fn transfer_json(status: &str) -> Value {
        json!({
            "transferId": "t-1",
            "transactionId": "tx-1",
            "status": status,
            "direction": "in",
            "domainName": "example.kr",
            "fromRegistrar": "Other Registrar",
            "nameservers": ["ns1.x", "ns2.x"],
            "createdDate": {"timestamp": 1735689600000i64, "date": "2025-01-01"},
            "updatedDate": {"timestamp": 1735689600000i64, "date": "2025-01-01"},
            "expiredDate": {"timestamp": 1736294400000i64, "date": "2025-01-08"}
        })
    }

    #[tokio::test]
    async fn verify_auth_code_posts_camel_case() {
        let mock = MockTransport::new();
        mock.push_data(json!({"valid": true, "domain": "example.kr", "registrar": "Other Registrar"}));

        let result = Transfers::new(requester(&mock))
            .verify_auth_code(&TransferAuthCodeVerifyRequest {
                domain: "example.kr".to_string(),
                auth_code: "ABC-123".to_string(),
            })
            .await
            .unwrap();
        assert!(result.valid);
        assert_eq!(result.registrar.as_deref(), Some("Other Registrar"));

        assert_eq!(mock.last_request().method, HttpMethod::Post);
        assert_eq!(mock.last_path(), "/api/v1/domains/transfer/auth-code/verify");
        assert_eq!(
            mock.last_body(),
            json!({"domain": "example.kr", "authCode": "ABC-123"})
        );
    }

    #[tokio::test]
    async fn initiate_then_poll() {
        let mock = MockTransport::new();
        mock.push_data(transfer_json("pending"));
        mock.push_data(transfer_json("completed"));
        let transfers = Transfers::new(requester(&mock));

        let started = transfers
            .initiate(&TransferInitiateRequest {
                domain: "example.kr".to_string(),
                auth_code: "ABC-123".to_string(),
                period: Some(1),
                nameservers: None,
                contact: None,
            })
            .await
            .unwrap();
        assert_eq!(started.status, TransferStatus::Pending);
        assert_eq!(started.direction, TransferDirection::In);
        assert_eq!(mock.last_path(), "/api/v1/domains/transfer");
        assert_eq!(
            mock.last_body(),
            json!({"domain": "example.kr", "authCode": "ABC-123", "period": 1})
        );

        let polled = transfers.get(&started.transfer_id).await.unwrap();
        assert!(polled.status.is_terminal());
        assert_eq!(mock.last_request().method, HttpMethod::Get);
        assert_eq!(mock.last_path(), "/api/v1/domains/transfer/t-1");
    }

    #[tokio::test]
    async fn list_keeps_pagination() {
        let mock = MockTransport::new();
        let mut body = envelope_body(json!([transfer_json("in_progress")]));
        body["pagination"] = json!({"page": 2, "size": 1, "total": 3, "totalPages": 3});
        mock.push_json(200, body);

        let query = TransferListQuery {
            page: Some(2),
            size: Some(1),
        };
        let envelope = Transfers::new(requester(&mock))
            .list(Some(&query))
            .await
            .unwrap();
        assert_eq!(envelope.data[0].status, TransferStatus::InProgress);
        assert_eq!(envelope.pagination.unwrap().total_pages, 3);
        assert_eq!(
            mock.last_request().query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn invalid_auth_code_surfaces_api_error() {
        let mock = MockTransport::new();
        mock.push_json(400, error_body("INVALID_AUTH_CODE", "Auth code mismatch"));

        let err = Transfers::new(requester(&mock))
            .initiate(&TransferInitiateRequest {
                domain: "example.kr".to_string(),
                auth_code: "WRONG".to_string(),
                period: None,
                nameservers: None,
                contact: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.api().unwrap().code, "INVALID_AUTH_CODE");
        assert_eq!(err.status(), Some(400));
    }
}
