use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Timestamp;

/// A registrant / admin / tech / billing contact held by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub name: ContactName,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    pub address: ContactAddress,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_contact_data: Option<AdditionalContactData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Name in the registry's national script and in Latin script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactName {
    pub national: String,
    pub international: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAddress {
    pub postal_code: String,
    pub national: ContactAddressDetail,
    pub international: ContactAddressDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAddressDetail {
    pub state: String,
    pub city: String,
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Registry-specific contact attributes.
///
/// `ctfy_code` is the KISA certification code required for `.kr` domains;
/// any other keys are kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalContactData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctfy_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreateRequest {
    pub name: ContactName,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    pub address: ContactAddress,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_contact_data: Option<AdditionalContactData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactListQuery {
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
    fn additional_data_keeps_unknown_keys() {
        let data: AdditionalContactData =
            serde_json::from_value(json!({"ctfyCode": "020", "bizNo": "123-45"})).unwrap();
        assert_eq!(data.ctfy_code.as_deref(), Some("020"));
        assert_eq!(data.extra["bizNo"], "123-45");
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"ctfyCode": "020", "bizNo": "123-45"})
        );
    }

    #[test]
    fn create_request_omits_absent_optionals() {
        let request = ContactCreateRequest {
            name: ContactName {
                national: "홍길동".to_string(),
                international: "Hong Gil Dong".to_string(),
            },
            email: "hong@example.com".to_string(),
            phone: "+82-2-1234-5678".to_string(),
            mobile: "+82-10-1234-5678".to_string(),
            fax: None,
            address: ContactAddress {
                postal_code: "06234".to_string(),
                national: ContactAddressDetail {
                    state: "서울특별시".to_string(),
                    city: "강남구".to_string(),
                    street: "테헤란로 128".to_string(),
                    detail: None,
                },
                international: ContactAddressDetail {
                    state: "Seoul".to_string(),
                    city: "Gangnam-gu".to_string(),
                    street: "128 Teheran-ro".to_string(),
                    detail: Some("3F".to_string()),
                },
            },
            country: "KR".to_string(),
            additional_contact_data: None,
            description: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["address"]["postalCode"], "06234");
        assert!(value.get("fax").is_none());
        assert!(value.get("additionalContactData").is_none());
        assert!(value["address"]["national"].get("detail").is_none());
        assert_eq!(value["address"]["international"]["detail"], "3F");
    }
}
