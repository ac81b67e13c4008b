use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Contact, Timestamp};

/// Registration state reported by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    Active,
    Pending,
    Expired,
    Suspended,
    Deleted,
    Failed,
    ClientTransferProhibited,
    ServerTransferProhibited,
}

/// A domain held by the tenant.
///
/// `contact` embeds the full contact records and `contact_id` only their
/// identifiers; list responses may carry either, so both are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub uuid: String,
    pub tenant_id: String,
    pub domain_name: String,
    pub status: DomainStatus,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub nameservers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authcode: Option<AuthCode>,
    #[serde(default)]
    pub transfer_lock: bool,
    #[serde(default)]
    pub transfer_auto_reject: bool,
    #[serde(default)]
    pub update_lock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<DomainContactFull>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<DomainContactIds>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCheckResult {
    pub domain: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRegistrationRequest {
    pub domain: String,
    /// Registration period in years.
    pub period: u32,
    pub nameservers: Vec<String>,
    pub contact: DomainContactIds,
}

/// Contact identifiers per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainContactIds {
    pub registrant: String,
    pub administrative: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<String>,
}

/// Full contact records per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainContactFull {
    pub registrant: Contact,
    pub administrative: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DomainStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockStatus {
    pub transfer_lock: bool,
    pub transfer_auto_reject: bool,
    pub update_lock: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferLockStatus {
    pub transfer_lock: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAutoRejectStatus {
    pub transfer_auto_reject: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLockStatus {
    pub update_lock: bool,
}

/// Transfer authorization code, plain and base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCode {
    pub code: String,
    pub base64: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRenewalRequest {
    /// Renewal period in years.
    pub period: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRenewal {
    pub renewal_id: String,
    pub domain_name: String,
    pub period: u32,
    pub price: f64,
    pub currency: String,
    pub status: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// One DNSSEC delegation signer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsRecord {
    pub algorithm: u8,
    pub digest: String,
    pub digest_type: u8,
    pub key_tag: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnssecUpdate {
    pub ds_data: Vec<DsRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisInfo {
    pub domain_name: String,
    pub registrar: String,
    pub registrant: String,
    pub created_date: String,
    pub expires_date: String,
    pub updated_date: String,
    pub status: Vec<String>,
    pub nameservers: Vec<String>,
    pub dnssec: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_whois: Option<String>,
}
