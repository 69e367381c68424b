//! High-level client: `CanopyClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared configuration and the accessors.

use crate::domain::admin::client::Admin;
use crate::domain::order::client::Orders;
use crate::domain::transaction::client::Transactions;
use crate::error::{SdkError, ValidationError};
use crate::http::CanopyHttp;
use crate::keystore::KeyProvider;
use crate::network::{self, env};

use std::sync::Arc;

// Re-export sub-client types for convenience.
pub use crate::domain::admin::client::Admin as AdminClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::transaction::client::Transactions as TransactionsClient;

/// The primary entry point for the Canopy Swap SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.transactions()`, `client.orders()`, `client.admin()`.
#[derive(Clone)]
pub struct CanopyClient {
    pub(crate) http: CanopyHttp,
    pub(crate) network_id: u64,
    pub(crate) chain_id: u64,
    pub(crate) keys: Option<Arc<dyn KeyProvider>>,
}

impl CanopyClient {
    pub fn builder() -> CanopyClientBuilder {
        CanopyClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn transactions(&self) -> Transactions<'_> {
        Transactions { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn admin(&self) -> Admin<'_> {
        Admin { client: self }
    }

    // ── Configuration ────────────────────────────────────────────────────

    pub fn http(&self) -> &CanopyHttp {
        &self.http
    }

    pub fn network_id(&self) -> u64 {
        self.network_id
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub(crate) fn key_provider(&self) -> Result<&dyn KeyProvider, SdkError> {
        self.keys
            .as_deref()
            .ok_or(SdkError::Validation(ValidationError::MissingField(
                "key_provider",
            )))
    }
}

impl std::fmt::Debug for CanopyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanopyClient")
            .field("query_url", &self.http.query_url())
            .field("admin_url", &self.http.admin_url())
            .field("network_id", &self.network_id)
            .field("chain_id", &self.chain_id)
            .field("keys", &self.keys.is_some())
            .finish()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CanopyClientBuilder {
    query_url: String,
    admin_url: String,
    network_id: u64,
    chain_id: u64,
    keys: Option<Arc<dyn KeyProvider>>,
}

impl Default for CanopyClientBuilder {
    fn default() -> Self {
        Self {
            query_url: network::DEFAULT_QUERY_URL.to_string(),
            admin_url: network::DEFAULT_ADMIN_URL.to_string(),
            network_id: network::DEFAULT_NETWORK_ID,
            chain_id: network::DEFAULT_CHAIN_ID,
            keys: None,
        }
    }
}

impl CanopyClientBuilder {
    /// Defaults overridden by `CANOPY_QUERY_URL`, `CANOPY_ADMIN_URL`,
    /// `CANOPY_NETWORK_ID` and `CANOPY_CHAIN_ID` where set.
    pub fn from_env() -> Result<Self, SdkError> {
        let mut builder = Self::default();
        if let Ok(url) = std::env::var(env::QUERY_URL) {
            builder.query_url = url;
        }
        if let Ok(url) = std::env::var(env::ADMIN_URL) {
            builder.admin_url = url;
        }
        if let Some(id) = env_u64(env::NETWORK_ID)? {
            builder.network_id = id;
        }
        if let Some(id) = env_u64(env::CHAIN_ID)? {
            builder.chain_id = id;
        }
        Ok(builder)
    }

    pub fn query_url(mut self, url: &str) -> Self {
        self.query_url = url.to_string();
        self
    }

    pub fn admin_url(mut self, url: &str) -> Self {
        self.admin_url = url.to_string();
        self
    }

    pub fn network_id(mut self, id: u64) -> Self {
        self.network_id = id;
        self
    }

    pub fn chain_id(mut self, id: u64) -> Self {
        self.chain_id = id;
        self
    }

    /// Keys used by `transactions()` and `orders()` to sign locally.
    pub fn key_provider(mut self, keys: impl KeyProvider + 'static) -> Self {
        self.keys = Some(Arc::new(keys));
        self
    }

    pub fn build(self) -> Result<CanopyClient, SdkError> {
        if self.network_id == 0 {
            return Err(ValidationError::Zero {
                field: "network_id",
            }
            .into());
        }
        if self.chain_id == 0 {
            return Err(ValidationError::Zero { field: "chain_id" }.into());
        }
        Ok(CanopyClient {
            http: CanopyHttp::new(&self.query_url, &self.admin_url)?,
            network_id: self.network_id,
            chain_id: self.chain_id,
            keys: self.keys,
        })
    }
}

fn env_u64(name: &'static str) -> Result<Option<u64>, SdkError> {
    match std::env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| {
                ValidationError::InvalidField {
                    field: name,
                    reason: format!("{:?} is not an unsigned integer", v),
                }
                .into()
            }),
        Err(_) => Ok(None),
    }
}
