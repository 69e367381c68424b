//! # Canopy Swap SDK
//!
//! Builds, signs and submits Canopy transactions. Signatures are computed
//! over a byte-exact reproduction of the node's protobuf serialization, so
//! they validate on-chain.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: canonical encoder (`codec`), curve registry (`crypto`),
//!    transaction builder (`tx`), key providers (`keystore`). Synchronous, no I/O.
//! 2. **HTTP API**: `CanopyHttp` with per-endpoint retry policies
//! 3. **High-Level Client**: `CanopyClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use canopy_swap_sdk::prelude::*;
//!
//! let key = KeyEntry::from_private_key(CurveType::Ed25519, &secret)?;
//! let signed = TransactionBuilder::with_defaults()
//!     .message(MessageSend { from_address: key.address(), to_address, amount: 1_000_000 })
//!     .fee(10_000)
//!     .created_height(height)
//!     .build_and_sign(&key)?;
//!
//! let client = CanopyClient::builder().key_provider(key).build()?;
//! let hash = client.transactions().submit(&signed).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Canonical protobuf encoding and the message schema tables.
pub mod codec;

/// Curve registry: identify, sign, verify, derive addresses.
pub mod crypto;

/// Key providers.
pub mod keystore;

/// Typed messages, the transaction envelope and the builder.
pub mod tx;

/// Domain modules (vertical slices): request/response types and sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `CanopyClient`, the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Address, OrderId};

    // Core
    pub use crate::codec::{encode, is_default_value, Field, Value, WireType};
    pub use crate::crypto::{CurveType, KeyEntry};
    pub use crate::keystore::{InMemoryKeystore, KeyProvider};
    pub use crate::tx::{
        Message, MessageChangeParameter, MessageCloseOrder, MessageCreateOrder,
        MessageDaoTransfer, MessageDeleteOrder, MessageDexLimitOrder, MessageDexLiquidityDeposit,
        MessageDexLiquidityWithdraw, MessageEditOrder, MessageEditStake, MessageLockOrder,
        MessagePause, MessageSend, MessageStake, MessageSubsidy, MessageUnpause, MessageUnstake,
        ParameterValue, SignedTransaction, Transaction, TransactionBuilder, UnsignedTransaction,
    };

    // Domain types
    pub use crate::domain::admin::{AdminOrder, TxResponse};
    pub use crate::domain::order::{NewOrder, PlacedOrder};
    pub use crate::domain::transaction::Submitted;

    // Errors
    pub use crate::error::{
        CryptoError, EncodingError, HttpError, KeystoreError, SdkError, ValidationError,
    };

    // Network
    pub use crate::network::{
        DEFAULT_ADMIN_URL, DEFAULT_CHAIN_ID, DEFAULT_NETWORK_ID, DEFAULT_QUERY_URL,
    };

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AdminClient, CanopyClient, CanopyClientBuilder, OrdersClient, TransactionsClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
