use std::sync::Arc;

use crate::envelope::Envelope;
use crate::error::LetoError;
use crate::requester::Requester;
use crate::types::{Tld, TldListQuery};

use super::optional_query;

/// Supported TLDs with their prices and registration rules.
#[derive(Debug, Clone)]
pub struct Tlds {
    http: Arc<Requester>,
}

impl Tlds {
    pub fn new(http: Arc<Requester>) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: Option<&TldListQuery>) -> Result<Envelope<Vec<Tld>>, LetoError> {
        self.http.get("/api/v1/tlds", optional_query(query)?).await
    }

    /// `tld` is given without the leading dot, e.g. `"kr"`.
    pub async fn get(&self, tld: &str) -> Result<Tld, LetoError> {
        Ok(self
            .http
            .get(&format!("/api/v1/tlds/{tld}"), Vec::new())
            .await?
            .data)
    }
}
