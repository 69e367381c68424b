//! Typed transaction payloads.
//!
//! Every payload is a plain struct with a fixed field table in
//! [`crate::codec::schema`]. [`Message`] is the closed union the builder
//! accepts; its JSON form is the payload object alone, the discriminator
//! travels next to it as `type`.

use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::codec::schema::{self, MessageSchema};
use crate::codec::{self, Field, Value};
use crate::error::{EncodingError, SdkError, ValidationError};
use crate::shared::serde_util::hex_bytes;
use crate::shared::{Address, OrderId, ADDRESS_LEN};

use super::Any;

/// A message payload with a fixed wire schema.
pub trait Payload {
    /// Discriminator carried in `Transaction.message_type`.
    const MESSAGE_TYPE: &'static str;
    const SCHEMA: &'static MessageSchema;

    /// Field values in schema order. Defaults are dropped by the encoder.
    fn fields(&self) -> Result<Vec<Field>, EncodingError>;

    /// Checks the node would reject anyway, done before anything is encoded.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

fn non_zero(field: &'static str, value: u64) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::Zero { field });
    }
    Ok(())
}

fn non_empty(field: &'static str, value: &[u8]) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn opt_address(address: &Option<Address>) -> Value {
    Value::Bytes(address.map(|a| a.to_vec()).unwrap_or_default())
}

// ─── Account & validator messages ────────────────────────────────────────────

/// Transfer `amount` from one account to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSend {
    pub from_address: Address,
    pub to_address: Address,
    pub amount: u64,
}

impl Payload for MessageSend {
    const MESSAGE_TYPE: &'static str = "send";
    const SCHEMA: &'static MessageSchema = &schema::send::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::send::*;
        Ok(vec![
            FROM_ADDRESS.with(self.from_address.to_vec().into()),
            TO_ADDRESS.with(self.to_address.to_vec().into()),
            AMOUNT.with(self.amount.into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("amount", self.amount)
    }
}

/// Stake a validator or delegator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStake {
    #[serde(with = "hex_bytes")]
    pub public_key: Vec<u8>,
    pub amount: u64,
    #[serde(default)]
    pub committees: Vec<u64>,
    #[serde(default)]
    pub net_address: String,
    pub output_address: Address,
    #[serde(default)]
    pub delegate: bool,
    #[serde(default)]
    pub compound: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<Address>,
}

impl Payload for MessageStake {
    const MESSAGE_TYPE: &'static str = "stake";
    const SCHEMA: &'static MessageSchema = &schema::stake::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::stake::*;
        Ok(vec![
            PUBLIC_KEY.with(self.public_key.clone().into()),
            AMOUNT.with(self.amount.into()),
            COMMITTEES.with(self.committees.clone().into()),
            NET_ADDRESS.with(self.net_address.as_str().into()),
            OUTPUT_ADDRESS.with(self.output_address.to_vec().into()),
            DELEGATE.with(self.delegate.into()),
            COMPOUND.with(self.compound.into()),
            SIGNER.with(opt_address(&self.signer)),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        crate::crypto::identify(&self.public_key).map_err(|e| ValidationError::InvalidField {
            field: "public_key",
            reason: e.to_string(),
        })?;
        non_zero("amount", self.amount)?;
        if self.committees.is_empty() {
            return Err(ValidationError::MissingField("committees"));
        }
        // delegators have no endpoint
        if !self.delegate && self.net_address.is_empty() {
            return Err(ValidationError::MissingField("net_address"));
        }
        Ok(())
    }
}

/// Change an existing stake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEditStake {
    pub address: Address,
    pub amount: u64,
    #[serde(default)]
    pub committees: Vec<u64>,
    #[serde(default)]
    pub net_address: String,
    pub output_address: Address,
    #[serde(default)]
    pub compound: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<Address>,
}

impl Payload for MessageEditStake {
    const MESSAGE_TYPE: &'static str = "editStake";
    const SCHEMA: &'static MessageSchema = &schema::edit_stake::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::edit_stake::*;
        Ok(vec![
            ADDRESS.with(self.address.to_vec().into()),
            AMOUNT.with(self.amount.into()),
            COMMITTEES.with(self.committees.clone().into()),
            NET_ADDRESS.with(self.net_address.as_str().into()),
            OUTPUT_ADDRESS.with(self.output_address.to_vec().into()),
            COMPOUND.with(self.compound.into()),
            SIGNER.with(opt_address(&self.signer)),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("amount", self.amount)
    }
}

macro_rules! address_only {
    ($(#[$doc:meta])* $ty:ident, $message_type:literal, $schema:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $ty {
            pub address: Address,
        }

        impl Payload for $ty {
            const MESSAGE_TYPE: &'static str = $message_type;
            const SCHEMA: &'static MessageSchema = &schema::$schema::SCHEMA;

            fn fields(&self) -> Result<Vec<Field>, EncodingError> {
                Ok(vec![schema::$schema::ADDRESS.with(self.address.to_vec().into())])
            }
        }
    };
}

address_only!(
    /// Begin unstaking a validator.
    MessageUnstake, "unstake", unstake
);
address_only!(
    /// Pause a validator.
    MessagePause, "pause", pause
);
address_only!(
    /// Resume a paused validator.
    MessageUnpause, "unpause", unpause
);

// ─── Governance ──────────────────────────────────────────────────────────────

/// New value of a governance parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Uint(u64),
    String(String),
}

impl ParameterValue {
    /// Wrap the value the way the node expects it inside `parameter_value`.
    pub fn to_any(&self) -> Result<Any, EncodingError> {
        match self {
            ParameterValue::Uint(v) => {
                let value = codec::encode(&[schema::uint64_wrapper::VALUE.with((*v).into())])?;
                Ok(Any::new(&schema::uint64_wrapper::SCHEMA, value))
            }
            ParameterValue::String(s) => {
                let value = codec::encode(&[schema::string_wrapper::VALUE.with(s.as_str().into())])?;
                Ok(Any::new(&schema::string_wrapper::SCHEMA, value))
            }
        }
    }
}

/// Governance proposal to change one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageChangeParameter {
    pub parameter_space: String,
    pub parameter_key: String,
    pub parameter_value: ParameterValue,
    pub start_height: u64,
    pub end_height: u64,
    pub signer: Address,
}

impl Payload for MessageChangeParameter {
    const MESSAGE_TYPE: &'static str = "changeParameter";
    const SCHEMA: &'static MessageSchema = &schema::change_parameter::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::change_parameter::*;
        Ok(vec![
            PARAMETER_SPACE.with(self.parameter_space.as_str().into()),
            PARAMETER_KEY.with(self.parameter_key.as_str().into()),
            PARAMETER_VALUE.with(Value::Message(self.parameter_value.to_any()?.fields())),
            START_HEIGHT.with(self.start_height.into()),
            END_HEIGHT.with(self.end_height.into()),
            SIGNER.with(self.signer.to_vec().into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.parameter_space.is_empty() {
            return Err(ValidationError::MissingField("parameter_space"));
        }
        if self.parameter_key.is_empty() {
            return Err(ValidationError::MissingField("parameter_key"));
        }
        if self.end_height < self.start_height {
            return Err(ValidationError::InvalidField {
                field: "end_height",
                reason: "before start_height".into(),
            });
        }
        Ok(())
    }
}

/// Governance proposal to pay out of the DAO treasury.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDaoTransfer {
    pub address: Address,
    pub amount: u64,
    pub start_height: u64,
    pub end_height: u64,
}

impl Payload for MessageDaoTransfer {
    const MESSAGE_TYPE: &'static str = "daoTransfer";
    const SCHEMA: &'static MessageSchema = &schema::dao_transfer::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::dao_transfer::*;
        Ok(vec![
            ADDRESS.with(self.address.to_vec().into()),
            AMOUNT.with(self.amount.into()),
            START_HEIGHT.with(self.start_height.into()),
            END_HEIGHT.with(self.end_height.into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("amount", self.amount)?;
        if self.end_height < self.start_height {
            return Err(ValidationError::InvalidField {
                field: "end_height",
                reason: "before start_height".into(),
            });
        }
        Ok(())
    }
}

/// Subsidize a committee's reward pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSubsidy {
    pub address: Address,
    #[serde(rename = "chainID")]
    pub chain_id: u64,
    pub amount: u64,
    #[serde(default)]
    pub opcode: String,
}

impl Payload for MessageSubsidy {
    const MESSAGE_TYPE: &'static str = "subsidy";
    const SCHEMA: &'static MessageSchema = &schema::subsidy::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::subsidy::*;
        Ok(vec![
            ADDRESS.with(self.address.to_vec().into()),
            CHAIN_ID.with(self.chain_id.into()),
            AMOUNT.with(self.amount.into()),
            OPCODE.with(self.opcode.as_str().into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("chain_id", self.chain_id)?;
        non_zero("amount", self.amount)
    }
}

// ─── Swap orders ─────────────────────────────────────────────────────────────

/// Offer `amount_for_sale` of this chain's token for `requested_amount` on
/// the counter chain `chain_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreateOrder {
    #[serde(rename = "chainID")]
    pub chain_id: u64,
    #[serde(default, with = "hex_bytes")]
    pub data: Vec<u8>,
    pub amount_for_sale: u64,
    pub requested_amount: u64,
    pub sales_recipient_address: Address,
}

impl Payload for MessageCreateOrder {
    const MESSAGE_TYPE: &'static str = "createOrder";
    const SCHEMA: &'static MessageSchema = &schema::create_order::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::create_order::*;
        Ok(vec![
            CHAIN_ID.with(self.chain_id.into()),
            DATA.with(self.data.clone().into()),
            AMOUNT_FOR_SALE.with(self.amount_for_sale.into()),
            REQUESTED_AMOUNT.with(self.requested_amount.into()),
            SALES_RECIPIENT_ADDRESS.with(self.sales_recipient_address.to_vec().into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("chain_id", self.chain_id)?;
        non_zero("amount_for_sale", self.amount_for_sale)?;
        non_zero("requested_amount", self.requested_amount)
    }
}

impl MessageCreateOrder {
    /// Id of the order this message opens: the first 20 bytes of the
    /// SHA-256 of the canonically encoded `MessageCreateOrder`.
    ///
    /// Depends only on the payload, so it is known before signing.
    pub fn order_id(&self) -> Result<OrderId, EncodingError> {
        let hash = Sha256::digest(codec::encode(&self.fields()?)?);
        let mut id = [0u8; ADDRESS_LEN];
        id.copy_from_slice(&hash[..ADDRESS_LEN]);
        Ok(OrderId::new(id))
    }
}

/// Reprice or redirect an unlocked order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEditOrder {
    #[serde(rename = "orderID")]
    pub order_id: OrderId,
    #[serde(rename = "chainID")]
    pub chain_id: u64,
    #[serde(default, with = "hex_bytes")]
    pub data: Vec<u8>,
    pub amount_for_sale: u64,
    pub requested_amount: u64,
    pub sales_recipient_address: Address,
}

impl Payload for MessageEditOrder {
    const MESSAGE_TYPE: &'static str = "editOrder";
    const SCHEMA: &'static MessageSchema = &schema::edit_order::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::edit_order::*;
        Ok(vec![
            ORDER_ID.with(self.order_id.to_vec().into()),
            CHAIN_ID.with(self.chain_id.into()),
            DATA.with(self.data.clone().into()),
            AMOUNT_FOR_SALE.with(self.amount_for_sale.into()),
            REQUESTED_AMOUNT.with(self.requested_amount.into()),
            SALES_RECIPIENT_ADDRESS.with(self.sales_recipient_address.to_vec().into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("chain_id", self.chain_id)?;
        non_zero("amount_for_sale", self.amount_for_sale)?;
        non_zero("requested_amount", self.requested_amount)
    }
}

/// Withdraw an unlocked order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDeleteOrder {
    #[serde(rename = "orderID")]
    pub order_id: OrderId,
    #[serde(rename = "chainID")]
    pub chain_id: u64,
}

impl Payload for MessageDeleteOrder {
    const MESSAGE_TYPE: &'static str = "deleteOrder";
    const SCHEMA: &'static MessageSchema = &schema::delete_order::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::delete_order::*;
        Ok(vec![
            ORDER_ID.with(self.order_id.to_vec().into()),
            CHAIN_ID.with(self.chain_id.into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("chain_id", self.chain_id)
    }
}

/// Buyer's claim on an order. `buyer_send_address` is an address on the
/// counter chain and may have any length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageLockOrder {
    #[serde(rename = "orderID")]
    pub order_id: OrderId,
    #[serde(rename = "chainID")]
    pub chain_id: u64,
    pub buyer_receive_address: Address,
    #[serde(with = "hex_bytes")]
    pub buyer_send_address: Vec<u8>,
    pub buyer_chain_deadline: u64,
}

impl Payload for MessageLockOrder {
    const MESSAGE_TYPE: &'static str = "lockOrder";
    const SCHEMA: &'static MessageSchema = &schema::lock_order::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::lock_order::*;
        Ok(vec![
            ORDER_ID.with(self.order_id.to_vec().into()),
            CHAIN_ID.with(self.chain_id.into()),
            BUYER_RECEIVE_ADDRESS.with(self.buyer_receive_address.to_vec().into()),
            BUYER_SEND_ADDRESS.with(self.buyer_send_address.clone().into()),
            BUYER_CHAIN_DEADLINE.with(self.buyer_chain_deadline.into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("chain_id", self.chain_id)?;
        non_empty("buyer_send_address", &self.buyer_send_address)?;
        non_zero("buyer_chain_deadline", self.buyer_chain_deadline)
    }
}

/// Seller's confirmation that the buyer paid on the counter chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCloseOrder {
    #[serde(rename = "orderID")]
    pub order_id: OrderId,
    #[serde(rename = "chainID")]
    pub chain_id: u64,
    #[serde(default)]
    pub close_order: bool,
}

impl Payload for MessageCloseOrder {
    const MESSAGE_TYPE: &'static str = "closeOrder";
    const SCHEMA: &'static MessageSchema = &schema::close_order::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::close_order::*;
        Ok(vec![
            ORDER_ID.with(self.order_id.to_vec().into()),
            CHAIN_ID.with(self.chain_id.into()),
            CLOSE_ORDER.with(self.close_order.into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("chain_id", self.chain_id)
    }
}

// ─── DEX ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDexLimitOrder {
    #[serde(rename = "chainID")]
    pub chain_id: u64,
    pub amount_for_sale: u64,
    pub requested_amount: u64,
    pub address: Address,
}

impl Payload for MessageDexLimitOrder {
    const MESSAGE_TYPE: &'static str = "dexLimitOrder";
    const SCHEMA: &'static MessageSchema = &schema::dex_limit_order::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::dex_limit_order::*;
        Ok(vec![
            CHAIN_ID.with(self.chain_id.into()),
            AMOUNT_FOR_SALE.with(self.amount_for_sale.into()),
            REQUESTED_AMOUNT.with(self.requested_amount.into()),
            ADDRESS.with(self.address.to_vec().into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("chain_id", self.chain_id)?;
        non_zero("amount_for_sale", self.amount_for_sale)?;
        non_zero("requested_amount", self.requested_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDexLiquidityDeposit {
    #[serde(rename = "chainID")]
    pub chain_id: u64,
    pub amount: u64,
    pub address: Address,
}

impl Payload for MessageDexLiquidityDeposit {
    const MESSAGE_TYPE: &'static str = "dexLiquidityDeposit";
    const SCHEMA: &'static MessageSchema = &schema::dex_liquidity_deposit::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::dex_liquidity_deposit::*;
        Ok(vec![
            CHAIN_ID.with(self.chain_id.into()),
            AMOUNT.with(self.amount.into()),
            ADDRESS.with(self.address.to_vec().into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("chain_id", self.chain_id)?;
        non_zero("amount", self.amount)
    }
}

/// `percent` of the caller's pool share, 1 to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDexLiquidityWithdraw {
    #[serde(rename = "chainID")]
    pub chain_id: u64,
    pub percent: u64,
    pub address: Address,
}

impl Payload for MessageDexLiquidityWithdraw {
    const MESSAGE_TYPE: &'static str = "dexLiquidityWithdraw";
    const SCHEMA: &'static MessageSchema = &schema::dex_liquidity_withdraw::SCHEMA;

    fn fields(&self) -> Result<Vec<Field>, EncodingError> {
        use schema::dex_liquidity_withdraw::*;
        Ok(vec![
            CHAIN_ID.with(self.chain_id.into()),
            PERCENT.with(self.percent.into()),
            ADDRESS.with(self.address.to_vec().into()),
        ])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_zero("chain_id", self.chain_id)?;
        if !(1..=100).contains(&self.percent) {
            return Err(ValidationError::InvalidField {
                field: "percent",
                reason: format!("{} is outside 1..=100", self.percent),
            });
        }
        Ok(())
    }
}

// ─── Message ─────────────────────────────────────────────────────────────────

macro_rules! messages {
    ($($variant:ident($ty:ident),)*) => {
        /// Every payload the node accepts.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Message {
            $($variant($ty),)*
        }

        impl Message {
            pub fn message_type(&self) -> &'static str {
                match self {
                    $(Message::$variant(_) => <$ty as Payload>::MESSAGE_TYPE,)*
                }
            }

            pub fn schema(&self) -> &'static MessageSchema {
                match self {
                    $(Message::$variant(_) => <$ty as Payload>::SCHEMA,)*
                }
            }

            pub fn fields(&self) -> Result<Vec<Field>, EncodingError> {
                match self {
                    $(Message::$variant(m) => m.fields(),)*
                }
            }

            pub fn validate(&self) -> Result<(), ValidationError> {
                match self {
                    $(Message::$variant(m) => m.validate(),)*
                }
            }

            /// Parse the JSON payload of a message whose discriminator is `message_type`.
            pub fn from_json(message_type: &str, value: serde_json::Value) -> Result<Self, SdkError> {
                $(
                    if message_type == <$ty as Payload>::MESSAGE_TYPE {
                        return Ok(Message::$variant(serde_json::from_value(value)?));
                    }
                )*
                Err(ValidationError::InvalidField {
                    field: "type",
                    reason: format!("unknown message type {}", message_type),
                }
                .into())
            }
        }

        $(
            impl From<$ty> for Message {
                fn from(m: $ty) -> Self {
                    Message::$variant(m)
                }
            }
        )*

        impl Serialize for Message {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                match self {
                    $(Message::$variant(m) => m.serialize(serializer),)*
                }
            }
        }
    };
}

messages! {
    Send(MessageSend),
    Stake(MessageStake),
    EditStake(MessageEditStake),
    Unstake(MessageUnstake),
    Pause(MessagePause),
    Unpause(MessageUnpause),
    ChangeParameter(MessageChangeParameter),
    DaoTransfer(MessageDaoTransfer),
    Subsidy(MessageSubsidy),
    CreateOrder(MessageCreateOrder),
    EditOrder(MessageEditOrder),
    DeleteOrder(MessageDeleteOrder),
    LockOrder(MessageLockOrder),
    CloseOrder(MessageCloseOrder),
    DexLimitOrder(MessageDexLimitOrder),
    DexLiquidityDeposit(MessageDexLiquidityDeposit),
    DexLiquidityWithdraw(MessageDexLiquidityWithdraw),
}

impl Message {
    /// Canonical payload bytes. Fails if the schema tables are inconsistent.
    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        schema::ensure_valid()?;
        codec::encode(&self.fields()?)
    }

    /// The payload packed as `Any`, as carried in `Transaction.msg`.
    pub fn to_any(&self) -> Result<Any, EncodingError> {
        Ok(Any::new(self.schema(), self.encode()?))
    }
}
