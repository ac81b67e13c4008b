use serde::{Deserialize, Serialize};

use super::{DomainContactIds, Timestamp};

/// Server-reported transfer progress.
///
/// `Pending` → `InProgress` → one of `Completed`, `Failed`, `Rejected`.
/// The client only reads this; the registry drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Rejected,
}

impl TransferStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TransferStatus::Completed | TransferStatus::Failed | TransferStatus::Rejected
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub transfer_id: String,
    pub transaction_id: String,
    pub status: TransferStatus,
    pub direction: TransferDirection,
    pub domain_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_registrar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_registrar: Option<String>,
    #[serde(default)]
    pub nameservers: Vec<String>,
    pub created_date: Timestamp,
    pub updated_date: Timestamp,
    pub expired_date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAuthCodeVerifyRequest {
    pub domain: String,
    pub auth_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAuthCodeVerifyResult {
    pub valid: bool,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInitiateRequest {
    pub domain: String,
    pub auth_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<DomainContactIds>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_lifecycle_names() {
        let status: TransferStatus = serde_json::from_value(json!("in_progress")).unwrap();
        assert_eq!(status, TransferStatus::InProgress);
        assert!(!status.is_terminal());
        assert!(TransferStatus::Rejected.is_terminal());
    }

    #[test]
    fn initiate_request_omits_optionals() {
        let request = TransferInitiateRequest {
            domain: "example.kr".to_string(),
            auth_code: "ABC-123".to_string(),
            period: None,
            nameservers: None,
            contact: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"domain": "example.kr", "authCode": "ABC-123"})
        );
    }
}
