//! Wire shapes served by the mock. Kept separate from the client's types so
//! the integration tests catch schema drift.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 2025-01-01T00:00:00Z, the mock's fixed "now".
pub const EPOCH_MS: i64 = 1_735_689_600_000;
const YEAR_MS: i64 = 365 * 86_400_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timestamp {
    pub timestamp: i64,
    pub date: String,
}

impl Timestamp {
    /// `years` whole years after [`EPOCH_MS`].
    pub fn years_from_now(years: u32) -> Self {
        Self {
            timestamp: EPOCH_MS + i64::from(years) * YEAR_MS,
            date: format!("{}-01-01", 2025 + years),
        }
    }

    pub fn now() -> Self {
        Self::years_from_now(0)
    }

    /// Push this timestamp `years` further out.
    pub fn extended(&self, years: u32) -> Self {
        let year: u32 = self
            .date
            .get(..4)
            .and_then(|y| y.parse().ok())
            .unwrap_or(2025);
        Self {
            timestamp: self.timestamp + i64::from(years) * YEAR_MS,
            date: format!("{}{}", year + years, self.date.get(4..).unwrap_or("-01-01")),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub total_pages: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthCode {
    pub code: String,
    pub base64: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactIds {
    pub registrant: String,
    pub administrative: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<String>,
}

impl ContactIds {
    pub fn all(&self) -> impl Iterator<Item = &String> {
        [&self.registrant, &self.administrative]
            .into_iter()
            .chain(self.technical.iter())
            .chain(self.billing.iter())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub uuid: String,
    pub tenant_id: String,
    pub domain_name: String,
    pub status: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub nameservers: Vec<String>,
    pub authcode: AuthCode,
    pub transfer_lock: bool,
    pub transfer_auto_reject: bool,
    pub update_lock: bool,
    pub contact_id: ContactIds,
    pub metadata: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Renewal {
    pub renewal_id: String,
    pub domain_name: String,
    pub period: u32,
    pub price: f64,
    pub currency: String,
    pub status: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsRecord {
    pub algorithm: u8,
    pub digest: String,
    pub digest_type: u8,
    pub key_tag: u16,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub transfer_id: String,
    pub transaction_id: String,
    pub status: String,
    pub direction: String,
    pub domain_name: String,
    pub from_registrar: String,
    pub to_registrar: String,
    pub nameservers: Vec<String>,
    pub created_date: Timestamp,
    pub updated_date: Timestamp,
    pub expired_date: Timestamp,
    #[serde(skip)]
    pub period: u32,
    #[serde(skip)]
    pub contact: Option<ContactIds>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    pub tenant_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub domain_name: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tld {
    pub tld: String,
    pub priority: i32,
    pub prices: TldPrices,
    pub currency: String,
    pub features: TldFeatures,
    pub rules: TldRules,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TldPrices {
    pub registration: f64,
    pub renewal: f64,
    pub transfer: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TldFeatures {
    pub supports_transfer: bool,
    pub supports_deletion: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TldRules {
    pub registration: Range,
    pub renewal: Range,
    pub transfer: Range,
    pub contact_types: Vec<String>,
    pub nameservers: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_contact_data: Option<Vec<String>>,
}

// Request bodies

#[derive(Debug, Deserialize)]
pub struct RegisterDomain {
    pub domain: String,
    pub period: u32,
    pub nameservers: Vec<String>,
    pub contact: ContactIds,
}

#[derive(Debug, Deserialize)]
pub struct Period {
    pub period: u32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Nameservers {
    pub nameservers: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DsData {
    pub ds_data: Vec<DsRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAuthCode {
    pub domain: String,
    pub auth_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateTransfer {
    pub domain: String,
    pub auth_code: String,
    pub period: Option<u32>,
    pub nameservers: Option<Vec<String>>,
    pub contact: Option<ContactIds>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DomainQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub domain: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_advance_by_whole_years() {
        let start = Timestamp::now();
        assert_eq!(start.date, "2025-01-01");
        let later = start.extended(2);
        assert_eq!(later.date, "2027-01-01");
        assert_eq!(later, Timestamp::years_from_now(2));
    }

    #[test]
    fn contact_ids_iterate_present_roles() {
        let ids = ContactIds {
            registrant: "a".to_string(),
            administrative: "b".to_string(),
            technical: None,
            billing: Some("c".to_string()),
        };
        let all: Vec<&String> = ids.all().collect();
        assert_eq!(all, ["a", "b", "c"]);
    }

    #[test]
    fn transfer_hides_internal_fields() {
        let transfer = Transfer {
            transfer_id: "t".to_string(),
            transaction_id: "tx".to_string(),
            status: "pending".to_string(),
            direction: "in".to_string(),
            domain_name: "a.kr".to_string(),
            from_registrar: "Other".to_string(),
            to_registrar: "LETO".to_string(),
            nameservers: Vec::new(),
            created_date: Timestamp::now(),
            updated_date: Timestamp::now(),
            expired_date: Timestamp::now(),
            period: 1,
            contact: None,
        };
        let json = serde_json::to_value(&transfer).unwrap();
        assert!(json.get("period").is_none());
        assert_eq!(json["transferId"], "t");
    }
}
