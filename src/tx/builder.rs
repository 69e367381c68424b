//! Fluent builder for creating and signing transactions.

use chrono::Utc;

use crate::crypto::KeyEntry;
use crate::error::{SdkError, ValidationError};
use crate::network::{DEFAULT_CHAIN_ID, DEFAULT_NETWORK_ID};

use super::{Message, SignedTransaction, UnsignedTransaction};

/// Longest memo the node accepts, in bytes.
pub const MAX_MEMO_LEN: usize = 200;

/// Builder for transactions with a fluent API.
///
/// Everything is checked in [`build`](Self::build) before any encoding
/// happens.
///
/// # Example
///
/// ```rust,ignore
/// use canopy_swap_sdk::prelude::*;
///
/// let signed = TransactionBuilder::new()
///     .message(MessageSend { from_address, to_address, amount: 1_000_000 })
///     .fee(10_000)
///     .network_id(1)
///     .chain_id(1)
///     .created_height(4_512)
///     .build_and_sign(&key)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    message: Option<Message>,
    fee: Option<u64>,
    memo: String,
    network_id: Option<u64>,
    chain_id: Option<u64>,
    created_height: Option<u64>,
    time: Option<u64>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preset with the default network and chain ids.
    pub fn with_defaults() -> Self {
        Self::new()
            .network_id(DEFAULT_NETWORK_ID)
            .chain_id(DEFAULT_CHAIN_ID)
    }

    /// Set the payload (required).
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the fee (required, may be 0).
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Set the network id (required).
    pub fn network_id(mut self, network_id: u64) -> Self {
        self.network_id = Some(network_id);
        self
    }

    /// Set the chain id (required).
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Set the height the transaction is created at (required).
    ///
    /// The node uses it to bound the transaction's lifetime.
    pub fn created_height(mut self, height: u64) -> Self {
        self.created_height = Some(height);
        self
    }

    /// Override the timestamp, in microseconds since the Unix epoch.
    ///
    /// Defaults to the current time.
    pub fn time(mut self, micros: u64) -> Self {
        self.time = Some(micros);
        self
    }

    /// Validate and produce the unsigned transaction.
    pub fn build(self) -> Result<UnsignedTransaction, ValidationError> {
        let message = self.message.ok_or(ValidationError::MissingField("message"))?;
        let fee = self.fee.ok_or(ValidationError::MissingField("fee"))?;
        let network_id = required_non_zero("network_id", self.network_id)?;
        let chain_id = required_non_zero("chain_id", self.chain_id)?;
        let created_height = required_non_zero("created_height", self.created_height)?;

        if self.memo.len() > MAX_MEMO_LEN {
            return Err(ValidationError::MemoTooLong {
                len: self.memo.len(),
                max: MAX_MEMO_LEN,
            });
        }

        message.validate()?;

        let time = match self.time {
            Some(t) => t,
            None => now_micros()?,
        };

        Ok(UnsignedTransaction {
            message,
            created_height,
            time,
            fee,
            memo: self.memo,
            network_id,
            chain_id,
        })
    }

    /// Validate, sign with `key`, and return the submittable transaction.
    pub fn build_and_sign(self, key: &KeyEntry) -> Result<SignedTransaction, SdkError> {
        self.build()?.sign(key)
    }
}

fn required_non_zero(field: &'static str, value: Option<u64>) -> Result<u64, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(0) => Err(ValidationError::Zero { field }),
        Some(v) => Ok(v),
    }
}

fn now_micros() -> Result<u64, ValidationError> {
    u64::try_from(Utc::now().timestamp_micros()).map_err(|_| ValidationError::InvalidField {
        field: "time",
        reason: "system clock is before the Unix epoch".into(),
    })
}
