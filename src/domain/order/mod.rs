//! Order domain: swap orders signed with local keys.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::{Address, OrderId};
use crate::tx::MessageCreateOrder;

/// Parameters of a new sell order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Counter chain the order trades against.
    pub committee: u64,
    pub amount_for_sale: u64,
    pub requested_amount: u64,
    /// Where the buyer's payment goes on the counter chain.
    pub sales_recipient_address: Address,
    pub data: Vec<u8>,
}

impl From<NewOrder> for MessageCreateOrder {
    fn from(order: NewOrder) -> Self {
        MessageCreateOrder {
            chain_id: order.committee,
            data: order.data,
            amount_for_sale: order.amount_for_sale,
            requested_amount: order.requested_amount,
            sales_recipient_address: order.sales_recipient_address,
        }
    }
}

/// Result of opening an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub tx_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_into_message() {
        let msg: MessageCreateOrder = NewOrder {
            committee: 2,
            amount_for_sale: 10,
            requested_amount: 20,
            sales_recipient_address: Address::new([1; 20]),
            data: vec![],
        }
        .into();
        assert_eq!(msg.chain_id, 2);
        assert_eq!(msg.requested_amount, 20);
    }
}
