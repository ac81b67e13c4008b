use std::sync::Arc;

use crate::error::LetoError;
use crate::requester::Requester;
use crate::types::AccountStatus;

/// Tenant account queries.
#[derive(Debug, Clone)]
pub struct Account {
    http: Arc<Requester>,
}

impl Account {
    pub fn new(http: Arc<Requester>) -> Self {
        Self { http }
    }

    /// Account standing, balance and contract expiry.
    pub async fn get_status(&self) -> Result<AccountStatus, LetoError> {
        Ok(self.http.get("/api/v1/account/status", Vec::new()).await?.data)
    }
}
