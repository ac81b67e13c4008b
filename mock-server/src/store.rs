//! In-memory state for one tenant.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{
    AuthCode, Domain, DsRecord, Range, Renewal, Timestamp, Tld, TldFeatures, TldPrices, TldRules,
    Transaction, Transfer,
};

pub const REGISTRAR: &str = "LETO";
pub const CURRENCY: &str = "KRW";
pub const STARTING_BALANCE: f64 = 1_000_000.0;

/// Names that are already held elsewhere and can only be transferred in.
pub const FOREIGN_DOMAINS: [&str; 2] = ["leto.kr", "transfer-me.com"];
/// Auth code the losing registrar always rejects.
pub const REJECTED_AUTH_CODE: &str = "WRONG";

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug)]
pub struct Store {
    pub tenant_id: String,
    pub balance: f64,
    pub tlds: Vec<Tld>,
    pub contacts: Vec<Value>,
    /// Keyed by domain name so listings come out sorted.
    pub domains: BTreeMap<String, Domain>,
    pub renewals: Vec<Renewal>,
    pub dnssec: BTreeMap<String, Vec<DsRecord>>,
    pub transfers: Vec<Transfer>,
    pub transactions: Vec<Transaction>,
    pub foreign: HashSet<String>,
}

impl Store {
    pub fn new(tenant_id: &str) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            balance: STARTING_BALANCE,
            tlds: default_tlds(),
            contacts: Vec::new(),
            domains: BTreeMap::new(),
            renewals: Vec::new(),
            dnssec: BTreeMap::new(),
            transfers: Vec::new(),
            transactions: Vec::new(),
            foreign: FOREIGN_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn shared(tenant_id: &str) -> Db {
        Arc::new(RwLock::new(Self::new(tenant_id)))
    }

    /// TLD rules for `domain`, matching the longest suffix (`co.kr` before `kr`).
    pub fn tld_for(&self, domain: &str) -> Option<&Tld> {
        self.tlds
            .iter()
            .filter(|tld| domain.ends_with(&format!(".{}", tld.tld)))
            .max_by_key(|tld| tld.tld.len())
    }

    pub fn contact_exists(&self, id: &str) -> bool {
        self.contacts.iter().any(|c| c["uuid"] == id)
    }

    /// Debit the balance and record a completed transaction.
    pub fn charge(&mut self, kind: &str, domain: &str, amount: f64) -> Option<String> {
        if amount > self.balance {
            return None;
        }
        self.balance -= amount;
        let transaction_id = new_id();
        self.transactions.push(Transaction {
            transaction_id: transaction_id.clone(),
            tenant_id: self.tenant_id.clone(),
            kind: kind.to_string(),
            domain_name: domain.to_string(),
            amount,
            currency: CURRENCY.to_string(),
            status: "completed".to_string(),
            created_at: Timestamp::now(),
            completed_at: Some(Timestamp::now()),
        });
        Some(transaction_id)
    }

    pub fn new_domain(
        &self,
        name: &str,
        period: u32,
        nameservers: Vec<String>,
        contact_id: crate::model::ContactIds,
    ) -> Domain {
        Domain {
            uuid: new_id(),
            tenant_id: self.tenant_id.clone(),
            domain_name: name.to_string(),
            status: "active".to_string(),
            expires_at: Timestamp::years_from_now(period),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
            nameservers,
            authcode: new_auth_code(),
            transfer_lock: true,
            transfer_auto_reject: false,
            update_lock: false,
            contact_id,
            metadata: Map::new(),
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn new_auth_code() -> AuthCode {
    let code = Uuid::new_v4().simple().to_string()[..12].to_uppercase();
    AuthCode {
        base64: STANDARD.encode(&code),
        code,
    }
}

fn tld(
    name: &str,
    priority: i32,
    price: f64,
    supports_deletion: bool,
    additional_contact_data: Option<Vec<String>>,
) -> Tld {
    Tld {
        tld: name.to_string(),
        priority,
        prices: TldPrices {
            registration: price,
            renewal: price,
            transfer: price * 0.9,
        },
        currency: CURRENCY.to_string(),
        features: TldFeatures {
            supports_transfer: true,
            supports_deletion,
        },
        rules: TldRules {
            registration: Range { min: 1, max: 10 },
            renewal: Range { min: 1, max: 10 },
            transfer: Range { min: 1, max: 1 },
            contact_types: vec!["registrant".to_string(), "administrative".to_string()],
            nameservers: Range { min: 2, max: 5 },
            additional_contact_data,
        },
    }
}

fn default_tlds() -> Vec<Tld> {
    let kr_data = Some(vec!["ctfyCode".to_string()]);
    vec![
        tld("kr", 1, 20_000.0, false, kr_data.clone()),
        tld("co.kr", 2, 20_000.0, false, kr_data),
        tld("com", 3, 15_000.0, true, None),
    ]
}
