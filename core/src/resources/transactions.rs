use std::sync::Arc;

use crate::envelope::Envelope;
use crate::error::LetoError;
use crate::requester::Requester;
use crate::types::{Transaction, TransactionListQuery};

use super::optional_query;

/// Billing history.
#[derive(Debug, Clone)]
pub struct Transactions {
    http: Arc<Requester>,
}

impl Transactions {
    pub fn new(http: Arc<Requester>) -> Self {
        Self { http }
    }

    /// Dates in `query` are passed through as given (`YYYY-MM-DD`).
    pub async fn list(
        &self,
        query: Option<&TransactionListQuery>,
    ) -> Result<Envelope<Vec<Transaction>>, LetoError> {
        self.http
            .get("/api/v1/transactions", optional_query(query)?)
            .await
    }
}
