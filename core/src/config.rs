//! Client configuration.

use std::time::Duration;

use crate::error::LetoError;

pub const DEFAULT_BASE_URL: &str = "https://api.leto.kr";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRIES: u32 = 3;

/// Credentials and transport settings for a [`LetoClient`].
///
/// `tenant_id` and `service_token` are required; [`LetoClient::new`]
/// rejects a config where either is blank.
///
/// [`LetoClient`]: crate::LetoClient
/// [`LetoClient::new`]: crate::LetoClient::new
#[derive(Clone)]
pub struct LetoConfig {
    pub tenant_id: String,
    pub service_token: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Maximum number of retries for idempotent requests. `0` disables.
    pub retries: u32,
}

impl LetoConfig {
    pub fn new(tenant_id: impl Into<String>, service_token: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            service_token: service_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Load from `LETO_TENANT_ID`, `LETO_SERVICE_TOKEN` and the optional
    /// `LETO_BASE_URL`, `LETO_TIMEOUT_MS`, `LETO_RETRIES`.
    pub fn from_env() -> Result<Self, LetoError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LetoError> {
        let mut config = Self::new(
            lookup("LETO_TENANT_ID").unwrap_or_default(),
            lookup("LETO_SERVICE_TOKEN").unwrap_or_default(),
        );
        if let Some(base_url) = lookup("LETO_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup("LETO_TIMEOUT_MS") {
            let millis: u64 = raw
                .parse()
                .map_err(|_| LetoError::Config(format!("LETO_TIMEOUT_MS is not a number: {raw}")))?;
            config.timeout = Duration::from_millis(millis);
        }
        if let Some(raw) = lookup("LETO_RETRIES") {
            config.retries = raw
                .parse()
                .map_err(|_| LetoError::Config(format!("LETO_RETRIES is not a number: {raw}")))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check the required credentials and the base URL scheme.
    pub fn validate(&self) -> Result<(), LetoError> {
        if self.tenant_id.trim().is_empty() {
            return Err(LetoError::Config("tenantId is required".to_string()));
        }
        if self.service_token.trim().is_empty() {
            return Err(LetoError::Config("serviceToken is required".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(LetoError::Config(format!(
                "baseUrl must be an http(s) URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

// The service token is a credential; keep it out of debug output.
impl std::fmt::Debug for LetoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LetoConfig")
            .field("tenant_id", &self.tenant_id)
            .field("service_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .finish()
    }
}
