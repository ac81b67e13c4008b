//! Data-transfer shapes for the LETO API.
//!
//! # Design
//! These types mirror the server's JSON schema one-to-one and carry no
//! behaviour. Wire names are camelCase; optional request fields are left out
//! of the body when `None`. The mock-server crate defines its own copies so
//! the integration tests catch schema drift.

mod account;
mod contact;
mod domain;
mod tld;
mod transaction;
mod transfer;

pub use account::{AccountState, AccountStatus, Balance};
pub use contact::{
    AdditionalContactData, Contact, ContactAddress, ContactAddressDetail, ContactCreateRequest,
    ContactListQuery, ContactName,
};
pub use domain::{
    AuthCode, DnssecUpdate, Domain, DomainCheckResult, DomainContactFull, DomainContactIds,
    DomainListQuery, DomainRegistrationRequest, DomainRenewal, DomainRenewalRequest, DomainStatus,
    DsRecord, LockStatus, TransferAutoRejectStatus, TransferLockStatus, UpdateLockStatus,
    WhoisInfo,
};
pub use tld::{PeriodRange, Tld, TldFeatures, TldListQuery, TldPrices, TldRules};
pub use transaction::{Transaction, TransactionListQuery, TransactionStatus, TransactionType};
pub use transfer::{
    Transfer, TransferAuthCodeVerifyRequest, TransferAuthCodeVerifyResult, TransferDirection,
    TransferInitiateRequest, TransferListQuery, TransferStatus,
};

use serde::{Deserialize, Serialize};

/// Server timestamp: epoch milliseconds plus a formatted date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub timestamp: i64,
    pub date: String,
}
