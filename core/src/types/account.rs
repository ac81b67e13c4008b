use serde::{Deserialize, Serialize};

/// Tenant account standing and prepaid balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    pub tenant_id: String,
    pub status: AccountState,
    pub created_at: String,
    /// `None` for accounts without a contract end date.
    pub expires_at: Option<String>,
    pub balance: Balance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountState {
    Active,
    Suspended,
}

/// Balance as the server reports it; `amount` is a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub amount: String,
    pub currency: String,
}
