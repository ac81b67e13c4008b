use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::LetoError;
use crate::requester::Requester;
use crate::types::{
    AuthCode, DnssecUpdate, Domain, DomainCheckResult, DomainContactIds, DomainListQuery,
    DomainRegistrationRequest, DomainRenewal, DomainRenewalRequest, DsRecord, LockStatus,
    TransferAutoRejectStatus, TransferLockStatus, UpdateLockStatus, WhoisInfo,
};

use super::optional_query;

#[derive(Serialize, Deserialize)]
struct Nameservers {
    nameservers: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DsData {
    ds_data: Vec<DsRecord>,
}

/// Domain registration, locks, auth codes, nameservers, contacts, renewals
/// and DNSSEC.
#[derive(Debug, Clone)]
pub struct Domains {
    http: Arc<Requester>,
}

impl Domains {
    pub fn new(http: Arc<Requester>) -> Self {
        Self { http }
    }

    fn path(domain: &str, tail: &str) -> String {
        format!("/api/v1/domains/{domain}{tail}")
    }

    /// Availability and price of `domain`.
    pub async fn check(&self, domain: &str) -> Result<DomainCheckResult, LetoError> {
        let query = vec![("domain".to_string(), domain.to_string())];
        Ok(self.http.get("/api/v1/domains/check", query).await?.data)
    }

    pub async fn register(&self, request: &DomainRegistrationRequest) -> Result<Domain, LetoError> {
        Ok(self.http.post("/api/v1/domains", Some(request)).await?.data)
    }

    pub async fn list(
        &self,
        query: Option<&DomainListQuery>,
    ) -> Result<Envelope<Vec<Domain>>, LetoError> {
        self.http.get("/api/v1/domains", optional_query(query)?).await
    }

    pub async fn get(&self, domain: &str) -> Result<Domain, LetoError> {
        Ok(self.http.get(&Self::path(domain, ""), Vec::new()).await?.data)
    }

    /// Only TLDs whose rules allow deletion accept this.
    pub async fn delete(&self, domain: &str) -> Result<(), LetoError> {
        self.http.delete_unit(&Self::path(domain, "")).await
    }

    pub async fn whois(&self, domain: &str) -> Result<WhoisInfo, LetoError> {
        Ok(self
            .http
            .get(&Self::path(domain, "/whois"), Vec::new())
            .await?
            .data)
    }

    // Locks

    /// All three lock flags at once.
    pub async fn get_locks(&self, domain: &str) -> Result<LockStatus, LetoError> {
        Ok(self
            .http
            .get(&Self::path(domain, "/locks"), Vec::new())
            .await?
            .data)
    }

    pub async fn get_transfer_lock(&self, domain: &str) -> Result<TransferLockStatus, LetoError> {
        Ok(self
            .http
            .get(&Self::path(domain, "/transferLock"), Vec::new())
            .await?
            .data)
    }

    pub async fn set_transfer_lock(
        &self,
        domain: &str,
        locked: bool,
    ) -> Result<TransferLockStatus, LetoError> {
        let body = TransferLockStatus {
            transfer_lock: locked,
        };
        Ok(self
            .http
            .put(&Self::path(domain, "/transferLock"), Some(&body))
            .await?
            .data)
    }

    pub async fn get_transfer_auto_reject(
        &self,
        domain: &str,
    ) -> Result<TransferAutoRejectStatus, LetoError> {
        Ok(self
            .http
            .get(&Self::path(domain, "/transferAutoReject"), Vec::new())
            .await?
            .data)
    }

    pub async fn set_transfer_auto_reject(
        &self,
        domain: &str,
        auto_reject: bool,
    ) -> Result<TransferAutoRejectStatus, LetoError> {
        let body = TransferAutoRejectStatus {
            transfer_auto_reject: auto_reject,
        };
        Ok(self
            .http
            .put(&Self::path(domain, "/transferAutoReject"), Some(&body))
            .await?
            .data)
    }

    pub async fn get_update_lock(&self, domain: &str) -> Result<UpdateLockStatus, LetoError> {
        Ok(self
            .http
            .get(&Self::path(domain, "/updateLock"), Vec::new())
            .await?
            .data)
    }

    pub async fn set_update_lock(
        &self,
        domain: &str,
        locked: bool,
    ) -> Result<UpdateLockStatus, LetoError> {
        let body = UpdateLockStatus {
            update_lock: locked,
        };
        Ok(self
            .http
            .put(&Self::path(domain, "/updateLock"), Some(&body))
            .await?
            .data)
    }

    // Authorization code

    pub async fn get_auth_code(&self, domain: &str) -> Result<AuthCode, LetoError> {
        Ok(self
            .http
            .get(&Self::path(domain, "/transfer/auth-code"), Vec::new())
            .await?
            .data)
    }

    /// Rotate the auth code; the old one stops working.
    pub async fn change_auth_code(&self, domain: &str) -> Result<AuthCode, LetoError> {
        Ok(self
            .http
            .put::<_, ()>(&Self::path(domain, "/transfer/auth-code"), None)
            .await?
            .data)
    }

    // Nameservers

    pub async fn get_nameservers(&self, domain: &str) -> Result<Vec<String>, LetoError> {
        let envelope: Envelope<Nameservers> = self
            .http
            .get(&Self::path(domain, "/nameservers"), Vec::new())
            .await?;
        Ok(envelope.data.nameservers)
    }

    /// Replace the delegation. Registries usually want 2 to 5 hosts; the
    /// server enforces the bound.
    pub async fn update_nameservers(
        &self,
        domain: &str,
        nameservers: &[String],
    ) -> Result<Vec<String>, LetoError> {
        let body = Nameservers {
            nameservers: nameservers.to_vec(),
        };
        let envelope: Envelope<Nameservers> = self
            .http
            .put(&Self::path(domain, "/nameservers"), Some(&body))
            .await?;
        Ok(envelope.data.nameservers)
    }

    // Contacts

    pub async fn get_contact(&self, domain: &str) -> Result<DomainContactIds, LetoError> {
        Ok(self
            .http
            .get(&Self::path(domain, "/contact"), Vec::new())
            .await?
            .data)
    }

    pub async fn update_contact(
        &self,
        domain: &str,
        contacts: &DomainContactIds,
    ) -> Result<DomainContactIds, LetoError> {
        Ok(self
            .http
            .put(&Self::path(domain, "/contact"), Some(contacts))
            .await?
            .data)
    }

    // Renewal

    /// Renew for `request.period` years. The registry allows one renewal per
    /// domain per day.
    pub async fn renew(
        &self,
        domain: &str,
        request: &DomainRenewalRequest,
    ) -> Result<DomainRenewal, LetoError> {
        Ok(self
            .http
            .post(&Self::path(domain, "/renewal"), Some(request))
            .await?
            .data)
    }

    pub async fn get_renewal_history(&self, domain: &str) -> Result<Vec<DomainRenewal>, LetoError> {
        Ok(self
            .http
            .get(&Self::path(domain, "/renewal"), Vec::new())
            .await?
            .data)
    }

    pub async fn cancel_renewal(&self, domain: &str, renewal_id: &str) -> Result<(), LetoError> {
        self.http
            .delete_unit(&Self::path(domain, &format!("/renewal/{renewal_id}")))
            .await
    }

    // DNSSEC (currently offered for .kr only)

    pub async fn get_dnssec(&self, domain: &str) -> Result<Vec<DsRecord>, LetoError> {
        let envelope: Envelope<DsData> = self
            .http
            .get(&Self::path(domain, "/dnssec"), Vec::new())
            .await?;
        Ok(envelope.data.ds_data)
    }

    pub async fn configure_dnssec(
        &self,
        domain: &str,
        dnssec: &DnssecUpdate,
    ) -> Result<Vec<DsRecord>, LetoError> {
        let envelope: Envelope<DsData> = self
            .http
            .post(&Self::path(domain, "/dnssec"), Some(dnssec))
            .await?;
        Ok(envelope.data.ds_data)
    }
}
