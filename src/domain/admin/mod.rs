//! Admin domain: transactions signed by the node's keystore.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

pub use wire::{KeystoreImportRequest, TxRequest, TxResponse};

use crate::shared::{Address, OrderId};

/// Parameters shared by the admin order endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOrder {
    /// Seller account in the node's keystore.
    pub address: Address,
    /// Counter chain the order trades against.
    pub committee: u64,
    pub amount_for_sale: u64,
    pub requested_amount: u64,
    pub receive_address: Address,
    pub data: Vec<u8>,
    pub fee: u64,
    pub memo: String,
    pub submit: bool,
}

impl AdminOrder {
    pub(crate) fn into_request(self, order_id: Option<OrderId>, password: &str) -> TxRequest {
        TxRequest {
            address: self.address,
            order_id,
            committees: self.committee.to_string(),
            amount: self.amount_for_sale,
            receive_amount: self.requested_amount,
            receive_address: Some(self.receive_address),
            data: self.data,
            fee: self.fee,
            memo: self.memo,
            submit: self.submit,
            password: password.to_string(),
        }
    }
}
