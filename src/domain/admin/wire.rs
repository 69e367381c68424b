//! Wire types for the node's admin API.
//!
//! The admin API signs with keys held in the node's own keystore, unlocked
//! per request with `password`.

use serde::{Deserialize, Serialize};

use crate::shared::serde_util::hex_bytes;
use crate::shared::{Address, OrderId};
use crate::tx::SignedTransaction;

/// Body of `POST /v1/admin/tx-create-order`, `tx-edit-order` and
/// `tx-delete-order`.
///
/// `committees` carries the counter chain id as a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRequest {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    pub committees: String,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub receive_amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_address: Option<Address>,
    #[serde(default, with = "hex_bytes", skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
    pub fee: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
    /// Broadcast after signing. When false the node only returns the signed
    /// transaction.
    pub submit: bool,
    pub password: String,
}

/// Body of `POST /v1/admin/keystore-import`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeystoreImportRequest {
    #[serde(with = "hex_bytes")]
    pub private_key: Vec<u8>,
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nickname: String,
}

impl std::fmt::Debug for KeystoreImportRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeystoreImportRequest")
            .field("private_key", &"<redacted>")
            .field("password", &"<redacted>")
            .field("nickname", &self.nickname)
            .finish()
    }
}

/// What an admin transaction endpoint answers with.
///
/// A hash when the node broadcast the transaction, the signed transaction
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TxResponse {
    Hash(String),
    Signed(Box<SignedTransaction>),
}

impl TxResponse {
    pub fn hash(&self) -> Option<&str> {
        match self {
            TxResponse::Hash(h) => Some(h),
            TxResponse::Signed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_request_serialization() {
        let req = TxRequest {
            address: Address::new([1; 20]),
            committees: "2".into(),
            amount: 100,
            receive_amount: 50,
            receive_address: Some(Address::new([2; 20])),
            fee: 10_000,
            submit: true,
            password: "pw".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["address"], "01".repeat(20));
        assert_eq!(json["receiveAmount"], 50);
        assert_eq!(json["receiveAddress"], "02".repeat(20));
        assert_eq!(json["committees"], "2");
        assert!(json.get("orderId").is_none());
        assert!(json.get("data").is_none());
        assert!(json.get("memo").is_none());
    }

    #[test]
    fn test_keystore_import_debug_redacts() {
        let req = KeystoreImportRequest {
            private_key: vec![0xaa; 32],
            password: "hunter2".into(),
            nickname: "alice".into(),
        };
        let debug = format!("{:?}", req);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains(&"aa".repeat(32)));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["privateKey"], "aa".repeat(32));
    }

    #[test]
    fn test_tx_response_hash() {
        let resp: TxResponse = serde_json::from_str("\"abcd\"").unwrap();
        assert_eq!(resp.hash(), Some("abcd"));
    }
}
