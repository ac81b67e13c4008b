//! One handle per API area.
//!
//! Each handle holds the shared [`Requester`](crate::requester::Requester)
//! and maps a method call to a fixed path, then unwraps the envelope. List
//! operations return the whole [`Envelope`](crate::Envelope) so callers can
//! read the pagination block.

mod account;
mod contacts;
mod domains;
mod tlds;
mod transactions;
mod transfers;

pub use account::Account;
pub use contacts::Contacts;
pub use domains::Domains;
pub use tlds::Tlds;
pub use transactions::Transactions;
pub use transfers::Transfers;

use serde::Serialize;

use crate::error::LetoError;
use crate::requester::query_pairs;

fn optional_query<Q: Serialize>(query: Option<&Q>) -> Result<Vec<(String, String)>, LetoError> {
    query.map(query_pairs).transpose().map(Option::unwrap_or_default)
}
