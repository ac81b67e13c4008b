use serde::{Deserialize, Serialize};

/// Pricing and registry rules for one top-level domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tld {
    pub tld: String,
    pub priority: i32,
    pub prices: TldPrices,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<TldFeatures>,
    pub rules: TldRules,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TldPrices {
    pub registration: f64,
    pub renewal: f64,
    pub transfer: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TldFeatures {
    pub supports_transfer: bool,
    pub supports_deletion: bool,
}

/// Allowed periods (years) and counts per operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TldRules {
    pub registration: PeriodRange,
    pub renewal: PeriodRange,
    pub transfer: PeriodRange,
    pub contact_types: Vec<String>,
    pub nameservers: PeriodRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_contact_data: Option<Vec<String>>,
}

/// Inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub min: u32,
    pub max: u32,
}

impl PeriodRange {
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TldListQuery {
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
    fn decodes_kr_rules() {
        let tld: Tld = serde_json::from_value(json!({
            "tld": "kr",
            "priority": 1,
            "prices": {"registration": 20000, "renewal": 20000, "transfer": 18000},
            "currency": "KRW",
            "rules": {
                "registration": {"min": 1, "max": 10},
                "renewal": {"min": 1, "max": 10},
                "transfer": {"min": 1, "max": 1},
                "contactTypes": ["registrant", "administrative"],
                "nameservers": {"min": 2, "max": 5},
                "additionalContactData": ["ctfyCode"]
            }
        }))
        .unwrap();
        assert_eq!(tld.prices.transfer, 18000.0);
        assert!(tld.features.is_none());
        assert!(tld.rules.nameservers.contains(2));
        assert!(!tld.rules.nameservers.contains(6));
    }
}
