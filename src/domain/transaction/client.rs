//! Transactions sub-client: sign locally, submit to the query API.

use crate::client::CanopyClient;
use crate::domain::transaction::Submitted;
use crate::error::SdkError;
use crate::shared::Address;
use crate::tx::{Message, SignedTransaction, TransactionBuilder};

pub struct Transactions<'a> {
    pub(crate) client: &'a CanopyClient,
}

impl<'a> Transactions<'a> {
    /// Current chain height.
    pub async fn height(&self) -> Result<u64, SdkError> {
        Ok(self.client.http.height().await?)
    }

    /// Submit an already signed transaction. Returns the node's hash.
    pub async fn submit(&self, tx: &SignedTransaction) -> Result<String, SdkError> {
        Ok(self.client.http.submit_tx(tx).await?)
    }

    /// Sign `message` with `signer`'s key at the current height.
    ///
    /// The key comes from the client's key provider and is dropped, wiping
    /// it, before this returns.
    pub async fn sign(
        &self,
        message: impl Into<Message>,
        fee: u64,
        memo: &str,
        signer: &Address,
    ) -> Result<SignedTransaction, SdkError> {
        let builder = TransactionBuilder::new()
            .message(message)
            .fee(fee)
            .memo(memo)
            .network_id(self.client.network_id)
            .chain_id(self.client.chain_id);
        // validate before touching the network or the key
        builder.clone().created_height(1).time(1).build()?;

        let height = self.height().await?;
        let key = self.client.key_provider()?.load(signer)?;
        builder.created_height(height).build_and_sign(&key)
    }

    /// Sign and submit.
    pub async fn send(
        &self,
        message: impl Into<Message>,
        fee: u64,
        memo: &str,
        signer: &Address,
    ) -> Result<Submitted, SdkError> {
        let transaction = self.sign(message, fee, memo, signer).await?;
        let hash = self.submit(&transaction).await?;
        tracing::debug!(%hash, message_type = %transaction.message_type, "transaction accepted");
        Ok(Submitted { hash, transaction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{CurveType, KeyEntry};
    use crate::error::ValidationError;
    use crate::tx::{MessageSend, MAX_MEMO_LEN};

    // Nothing listens on port 1: reaching the network would fail with an
    // HTTP error instead of the validation error asserted below.
    fn offline_client(key: &KeyEntry) -> CanopyClient {
        CanopyClient::builder()
            .query_url("http://127.0.0.1:1")
            .key_provider(key.clone())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_sign_validates_before_network() {
        let key = KeyEntry::from_private_key(CurveType::Ed25519, &[5; 32]).unwrap();
        let client = offline_client(&key);
        let zero_send = MessageSend {
            from_address: key.address(),
            to_address: key.address(),
            amount: 0,
        };

        let err = client
            .transactions()
            .sign(zero_send, 10, "", &key.address())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SdkError::Validation(ValidationError::Zero { field: "amount" })
        ));
    }

    #[tokio::test]
    async fn test_sign_rejects_long_memo_before_network() {
        let key = KeyEntry::from_private_key(CurveType::Ed25519, &[6; 32]).unwrap();
        let client = offline_client(&key);
        let send = MessageSend {
            from_address: key.address(),
            to_address: key.address(),
            amount: 1,
        };

        let err = client
            .transactions()
            .send(send, 10, &"m".repeat(MAX_MEMO_LEN + 1), &key.address())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SdkError::Validation(ValidationError::MemoTooLong { .. })
        ));
    }
}
