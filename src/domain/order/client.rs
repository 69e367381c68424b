//! Orders sub-client: create, edit, delete, lock and close swap orders.

use crate::client::CanopyClient;
use crate::domain::order::{NewOrder, PlacedOrder};
use crate::domain::transaction::Submitted;
use crate::error::SdkError;
use crate::shared::{Address, OrderId};
use crate::tx::{
    MessageCloseOrder, MessageCreateOrder, MessageDeleteOrder, MessageEditOrder, MessageLockOrder,
};

pub struct Orders<'a> {
    pub(crate) client: &'a CanopyClient,
}

impl<'a> Orders<'a> {
    /// Open a sell order. The order id is a hash of the create-order payload,
    /// so it is fixed before the transaction is signed.
    pub async fn create(
        &self,
        order: NewOrder,
        fee: u64,
        seller: &Address,
    ) -> Result<PlacedOrder, SdkError> {
        let msg = MessageCreateOrder::from(order);
        let order_id = msg.order_id()?;
        let submitted = self.client.transactions().send(msg, fee, "", seller).await?;
        Ok(PlacedOrder {
            order_id,
            tx_hash: submitted.hash,
        })
    }

    pub async fn edit(
        &self,
        order_id: OrderId,
        order: NewOrder,
        fee: u64,
        seller: &Address,
    ) -> Result<Submitted, SdkError> {
        let msg = MessageEditOrder {
            order_id,
            chain_id: order.committee,
            data: order.data,
            amount_for_sale: order.amount_for_sale,
            requested_amount: order.requested_amount,
            sales_recipient_address: order.sales_recipient_address,
        };
        self.client.transactions().send(msg, fee, "", seller).await
    }

    pub async fn delete(
        &self,
        order_id: OrderId,
        committee: u64,
        fee: u64,
        seller: &Address,
    ) -> Result<Submitted, SdkError> {
        let msg = MessageDeleteOrder {
            order_id,
            chain_id: committee,
        };
        self.client.transactions().send(msg, fee, "", seller).await
    }

    /// Claim an order as buyer. `buyer_send_address` is the buyer's address
    /// on the counter chain.
    pub async fn lock(
        &self,
        order_id: OrderId,
        committee: u64,
        buyer_send_address: Vec<u8>,
        buyer_chain_deadline: u64,
        fee: u64,
        buyer: &Address,
    ) -> Result<Submitted, SdkError> {
        let msg = MessageLockOrder {
            order_id,
            chain_id: committee,
            buyer_receive_address: *buyer,
            buyer_send_address,
            buyer_chain_deadline,
        };
        self.client.transactions().send(msg, fee, "", buyer).await
    }

    pub async fn close(
        &self,
        order_id: OrderId,
        committee: u64,
        fee: u64,
        seller: &Address,
    ) -> Result<Submitted, SdkError> {
        let msg = MessageCloseOrder {
            order_id,
            chain_id: committee,
            close_order: true,
        };
        self.client.transactions().send(msg, fee, "", seller).await
    }
}
