use std::sync::Arc;

use crate::envelope::Envelope;
use crate::error::LetoError;
use crate::requester::Requester;
use crate::types::{Contact, ContactCreateRequest, ContactListQuery};

use super::optional_query;

/// Contact records used as registrant / admin / tech / billing.
#[derive(Debug, Clone)]
pub struct Contacts {
    http: Arc<Requester>,
}

impl Contacts {
    pub fn new(http: Arc<Requester>) -> Self {
        Self { http }
    }

    /// Create a contact; the returned record carries its new `uuid`.
    pub async fn create(&self, request: &ContactCreateRequest) -> Result<Contact, LetoError> {
        Ok(self.http.post("/api/v1/contacts", Some(request)).await?.data)
    }

    pub async fn list(
        &self,
        query: Option<&ContactListQuery>,
    ) -> Result<Envelope<Vec<Contact>>, LetoError> {
        self.http
            .get("/api/v1/contacts", optional_query(query)?)
            .await
    }
}
