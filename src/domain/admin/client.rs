//! Admin sub-client: orders signed by the node's own keystore.

use crate::client::CanopyClient;
use crate::domain::admin::{AdminOrder, KeystoreImportRequest, TxRequest, TxResponse};
use crate::error::SdkError;
use crate::shared::{Address, OrderId};

/// Sub-client for admin operations.
pub struct Admin<'a> {
    pub(crate) client: &'a CanopyClient,
}

impl<'a> Admin<'a> {
    pub async fn create_order(
        &self,
        order: AdminOrder,
        password: &str,
    ) -> Result<TxResponse, SdkError> {
        let request = order.into_request(None, password);
        Ok(self.client.http.admin_create_order(&request).await?)
    }

    pub async fn edit_order(
        &self,
        order_id: OrderId,
        order: AdminOrder,
        password: &str,
    ) -> Result<TxResponse, SdkError> {
        let request = order.into_request(Some(order_id), password);
        Ok(self.client.http.admin_edit_order(&request).await?)
    }

    pub async fn delete_order(
        &self,
        address: Address,
        order_id: OrderId,
        committee: u64,
        fee: u64,
        password: &str,
    ) -> Result<TxResponse, SdkError> {
        let request = TxRequest {
            address,
            order_id: Some(order_id),
            committees: committee.to_string(),
            fee,
            submit: true,
            password: password.to_string(),
            ..Default::default()
        };
        Ok(self.client.http.admin_delete_order(&request).await?)
    }

    /// Import a raw private key into the node's keystore. Returns its address.
    pub async fn keystore_import(
        &self,
        private_key: &[u8],
        password: &str,
        nickname: &str,
    ) -> Result<Address, SdkError> {
        let request = KeystoreImportRequest {
            private_key: private_key.to_vec(),
            password: password.to_string(),
            nickname: nickname.to_string(),
        };
        Ok(self.client.http.keystore_import(&request).await?)
    }
}
