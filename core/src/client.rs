//! The client facade.
//!
//! # Design
//! `LetoClient` validates its [`LetoConfig`], builds one [`Requester`] and
//! hands an `Arc` of it to each resource handle. The handles are public
//! fields, so a call reads `client.domains.check("example.kr")`. Cloning
//! the client is cheap and shares the transport.

use std::sync::Arc;

use crate::config::LetoConfig;
use crate::error::LetoError;
use crate::http::{ReqwestTransport, Transport};
use crate::requester::Requester;
use crate::resources::{Account, Contacts, Domains, Tlds, Transactions, Transfers};
use crate::retry::RetryPolicy;

/// Typed client for the LETO partner API.
#[derive(Debug, Clone)]
pub struct LetoClient {
    pub account: Account,
    pub contacts: Contacts,
    pub domains: Domains,
    pub transfers: Transfers,
    pub tlds: Tlds,
    pub transactions: Transactions,
    http: Arc<Requester>,
}

impl LetoClient {
    /// Build a client backed by [`ReqwestTransport`].
    ///
    /// Fails with [`LetoError::Config`] before anything touches the network
    /// if `tenant_id` or `service_token` is blank.
    pub fn new(config: LetoConfig) -> Result<Self, LetoError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Build a client on a caller-supplied transport.
    pub fn with_transport(
        config: LetoConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, LetoError> {
        config.validate()?;
        let http = Arc::new(Requester::new(
            &config.base_url,
            &config.tenant_id,
            &config.service_token,
            transport,
            RetryPolicy::new(config.retries),
        ));
        tracing::debug!(
            base_url = http.base_url(),
            tenant_id = %config.tenant_id,
            retries = config.retries,
            "LETO client configured"
        );

        Ok(Self {
            account: Account::new(http.clone()),
            contacts: Contacts::new(http.clone()),
            domains: Domains::new(http.clone()),
            transfers: Transfers::new(http.clone()),
            tlds: Tlds::new(http.clone()),
            transactions: Transactions::new(http.clone()),
            http,
        })
    }

    /// Build a client from `LETO_*` environment variables.
    pub fn from_env() -> Result<Self, LetoError> {
        Self::new(LetoConfig::from_env()?)
    }

    /// The shared pipeline, for endpoints without a typed wrapper.
    pub fn requester(&self) -> &Arc<Requester> {
        &self.http
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::test_support::{error_body, MockTransport};
    use crate::types::*;

    fn config() -> LetoConfig {
        LetoConfig::new("tenant-1", "token-1")
            .with_base_url("http://localhost:3000/")
            .with_retries(0)
    }

    #[test]
    fn missing_tenant_fails_before_any_request() {
        let mock = MockTransport::new();
        let err = LetoClient::with_transport(LetoConfig::new("", "token-1"), mock.clone())
            .unwrap_err();
        assert!(matches!(err, LetoError::Config(ref msg) if msg == "tenantId is required"));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn missing_token_fails_before_any_request() {
        let mock = MockTransport::new();
        let err = LetoClient::with_transport(LetoConfig::new("tenant-1", " "), mock.clone())
            .unwrap_err();
        assert!(matches!(err, LetoError::Config(ref msg) if msg == "serviceToken is required"));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn new_rejects_blank_credentials() {
        assert!(matches!(
            LetoClient::new(LetoConfig::new("", "")),
            Err(LetoError::Config(_))
        ));
    }

    #[test]
    fn new_builds_with_reqwest() {
        let client = LetoClient::new(
            LetoConfig::new("tenant-1", "token-1").with_timeout(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(client.requester().base_url(), "https://api.leto.kr");
        assert_eq!(client.requester().retry_policy().max_retries, 3);
    }

    #[tokio::test]
    async fn resources_share_one_pipeline() {
        let mock = MockTransport::new();
        mock.push_data(json!({
            "tenantId": "tenant-1",
            "status": "ACTIVE",
            "createdAt": "2024-01-01T00:00:00Z",
            "balance": {"amount": "150000.00", "currency": "KRW"}
        }));
        mock.push_data(json!({"domain": "example.kr", "available": false}));
        let client = LetoClient::with_transport(config(), mock.clone()).unwrap();

        client.account.get_status().await.unwrap();
        let check = client.domains.check("example.kr").await.unwrap();
        assert!(!check.available);

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            assert!(request.url.starts_with("http://localhost:3000/api/v1/"));
            assert_eq!(request.header("X-Tenant-ID"), Some("tenant-1"));
            assert_eq!(request.header("X-Service-Token"), Some("token-1"));
        }
    }

    fn contact_request() -> ContactCreateRequest {
        let detail = |city: &str| ContactAddressDetail {
            state: "Seoul".to_string(),
            city: city.to_string(),
            street: "1 Teheran-ro".to_string(),
            detail: None,
        };
        ContactCreateRequest {
            name: ContactName {
                national: "홍길동".to_string(),
                international: "Hong Gil Dong".to_string(),
            },
            email: "hong@example.com".to_string(),
            phone: "+82-2-1234-5678".to_string(),
            mobile: "+82-10-1234-5678".to_string(),
            fax: None,
            address: ContactAddress {
                postal_code: "06000".to_string(),
                national: detail("강남구"),
                international: detail("Gangnam-gu"),
            },
            country: "KR".to_string(),
            additional_contact_data: None,
            description: None,
        }
    }

    /// Call every resource method once, in order, keeping only the outcome.
    async fn call_every_method(client: &LetoClient) -> Vec<(&'static str, Result<(), LetoError>)> {
        let ids = DomainContactIds {
            registrant: "c-1".to_string(),
            administrative: "c-1".to_string(),
            technical: None,
            billing: None,
        };
        let registration = DomainRegistrationRequest {
            domain: "example.kr".to_string(),
            period: 1,
            nameservers: vec!["ns1.x".to_string(), "ns2.x".to_string()],
            contact: ids.clone(),
        };
        let dnssec = DnssecUpdate {
            ds_data: vec![DsRecord {
                algorithm: 13,
                digest: "ABCDEF".to_string(),
                digest_type: 2,
                key_tag: 12345,
            }],
        };
        let verify = TransferAuthCodeVerifyRequest {
            domain: "leto.kr".to_string(),
            auth_code: "ABC-123".to_string(),
        };
        let initiate = TransferInitiateRequest {
            domain: "leto.kr".to_string(),
            auth_code: "ABC-123".to_string(),
            period: None,
            nameservers: None,
            contact: None,
        };
        let nameservers = vec!["ns1.x".to_string()];
        let contact = contact_request();
        let d = &client.domains;
        let name = "example.kr";

        vec![
            ("account.get_status", client.account.get_status().await.map(drop)),
            ("contacts.create", client.contacts.create(&contact).await.map(drop)),
            ("contacts.list", client.contacts.list(None).await.map(drop)),
            ("domains.check", d.check(name).await.map(drop)),
            ("domains.register", d.register(&registration).await.map(drop)),
            ("domains.list", d.list(None).await.map(drop)),
            ("domains.get", d.get(name).await.map(drop)),
            ("domains.delete", d.delete(name).await),
            ("domains.whois", d.whois(name).await.map(drop)),
            ("domains.get_locks", d.get_locks(name).await.map(drop)),
            ("domains.get_transfer_lock", d.get_transfer_lock(name).await.map(drop)),
            ("domains.set_transfer_lock", d.set_transfer_lock(name, true).await.map(drop)),
            ("domains.get_transfer_auto_reject", d.get_transfer_auto_reject(name).await.map(drop)),
            ("domains.set_transfer_auto_reject", d.set_transfer_auto_reject(name, true).await.map(drop)),
            ("domains.get_update_lock", d.get_update_lock(name).await.map(drop)),
            ("domains.set_update_lock", d.set_update_lock(name, true).await.map(drop)),
            ("domains.get_auth_code", d.get_auth_code(name).await.map(drop)),
            ("domains.change_auth_code", d.change_auth_code(name).await.map(drop)),
            ("domains.get_nameservers", d.get_nameservers(name).await.map(drop)),
            ("domains.update_nameservers", d.update_nameservers(name, &nameservers).await.map(drop)),
            ("domains.get_contact", d.get_contact(name).await.map(drop)),
            ("domains.update_contact", d.update_contact(name, &ids).await.map(drop)),
            ("domains.renew", d.renew(name, &DomainRenewalRequest { period: 1 }).await.map(drop)),
            ("domains.get_renewal_history", d.get_renewal_history(name).await.map(drop)),
            ("domains.cancel_renewal", d.cancel_renewal(name, "r-1").await),
            ("domains.get_dnssec", d.get_dnssec(name).await.map(drop)),
            ("domains.configure_dnssec", d.configure_dnssec(name, &dnssec).await.map(drop)),
            ("transfers.verify_auth_code", client.transfers.verify_auth_code(&verify).await.map(drop)),
            ("transfers.initiate", client.transfers.initiate(&initiate).await.map(drop)),
            ("transfers.get", client.transfers.get("t-1").await.map(drop)),
            ("transfers.list", client.transfers.list(None).await.map(drop)),
            ("tlds.list", client.tlds.list(None).await.map(drop)),
            ("tlds.get", client.tlds.get("kr").await.map(drop)),
            ("transactions.list", client.transactions.list(None).await.map(drop)),
        ]
    }

    #[tokio::test]
    async fn every_method_surfaces_error_envelopes() {
        let mock = MockTransport::new();
        for _ in 0..64 {
            mock.push_json(409, error_body("DOMAIN_UPDATE_LOCKED", "Domain is update-locked"));
        }
        let client = LetoClient::with_transport(config(), mock.clone()).unwrap();

        let outcomes = call_every_method(&client).await;
        assert_eq!(outcomes.len(), 34);
        assert_eq!(mock.requests().len(), outcomes.len());
        for (method, outcome) in outcomes {
            let err = outcome.expect_err(method);
            let api = err
                .api()
                .unwrap_or_else(|| panic!("{method}: expected Api, got {err:?}"));
            assert_eq!(api.code, "DOMAIN_UPDATE_LOCKED", "{method}");
            assert_eq!(api.message, "Domain is update-locked", "{method}");
            assert_eq!(api.status, 409, "{method}");
            assert_eq!(api.timestamp, "2024-05-01T09:00:00Z", "{method}");
            assert_eq!(api.data, serde_json::Value::Null, "{method}");
            assert!(!api.success, "{method}");
        }
    }

    #[tokio::test]
    async fn every_method_passes_raw_gateway_failures_through() {
        let page = "<html><body>504 Gateway Time-out</body></html>";
        let mock = MockTransport::new();
        for _ in 0..64 {
            mock.push_raw(504, page);
        }
        let client = LetoClient::with_transport(config(), mock.clone()).unwrap();

        let outcomes = call_every_method(&client).await;
        assert_eq!(mock.requests().len(), outcomes.len());
        for (method, outcome) in outcomes {
            match outcome {
                Err(LetoError::Http { status, body }) => {
                    assert_eq!(status, 504, "{method}");
                    assert_eq!(body, page, "{method}");
                }
                other => panic!("{method}: expected Http, got {other:?}"),
            }
        }
    }

    #[test]
    fn clones_share_requester() {
        let mock = MockTransport::new();
        let client = LetoClient::with_transport(config(), mock).unwrap();
        let other = client.clone();
        assert!(Arc::ptr_eq(client.requester(), other.requester()));
    }
}
