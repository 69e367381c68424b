//! Field tables for every message the node accepts.
//!
//! Field ids and wire types are a fixed external contract: changing one breaks
//! signature compatibility with the node. Each table is a `const`, and the
//! registry checks all of them once, on first use.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use super::{Field, Value, WireType, MAX_FIELD_ID};
use crate::error::EncodingError;

/// Prefix of every `Any.type_url`.
pub const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

/// One field of a message schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub id: u32,
    pub name: &'static str,
    pub wire_type: WireType,
    /// Schema of the embedded message, for [`WireType::Message`] fields.
    pub nested: Option<&'static MessageSchema>,
}

impl FieldDescriptor {
    pub const fn new(id: u32, name: &'static str, wire_type: WireType) -> Self {
        Self {
            id,
            name,
            wire_type,
            nested: None,
        }
    }

    pub const fn string(id: u32, name: &'static str) -> Self {
        Self::new(id, name, WireType::String)
    }

    pub const fn bytes(id: u32, name: &'static str) -> Self {
        Self::new(id, name, WireType::Bytes)
    }

    pub const fn uint64(id: u32, name: &'static str) -> Self {
        Self::new(id, name, WireType::Uint64)
    }

    pub const fn uint32(id: u32, name: &'static str) -> Self {
        Self::new(id, name, WireType::Uint32)
    }

    pub const fn bool(id: u32, name: &'static str) -> Self {
        Self::new(id, name, WireType::Bool)
    }

    pub const fn packed_uint64(id: u32, name: &'static str) -> Self {
        Self::new(id, name, WireType::PackedUint64)
    }

    pub const fn message(id: u32, name: &'static str, nested: &'static MessageSchema) -> Self {
        Self {
            id,
            name,
            wire_type: WireType::Message,
            nested: Some(nested),
        }
    }

    /// Bind a value to this field.
    pub fn with(&self, value: Value) -> Field {
        Field::new(self.id, self.wire_type, value)
    }
}

/// A named, ordered field table.
#[derive(Debug)]
pub struct MessageSchema {
    /// Fully-qualified protobuf name, e.g. `types.MessageSend`.
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl MessageSchema {
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { name, fields }
    }

    pub fn field_by_id(&self, id: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// `type.googleapis.com/<name>`, as carried in `Any.type_url`.
    pub fn type_url(&self) -> String {
        format!("{}{}", TYPE_URL_PREFIX, self.name)
    }

    pub fn validate(&self) -> Result<(), EncodingError> {
        let invalid = |reason: String| EncodingError::InvalidSchema {
            schema: self.name,
            reason,
        };

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for field in self.fields {
            if field.id == 0 || field.id > MAX_FIELD_ID {
                return Err(invalid(format!("field id {} out of range", field.id)));
            }
            if !ids.insert(field.id) {
                return Err(invalid(format!("duplicate field id {}", field.id)));
            }
            if !names.insert(field.name) {
                return Err(invalid(format!("duplicate field name {}", field.name)));
            }
            match (field.wire_type, field.nested) {
                (WireType::Message, None) => {
                    return Err(invalid(format!("message field {} has no schema", field.name)))
                }
                (WireType::Message, Some(_)) | (_, None) => {}
                (_, Some(_)) => {
                    return Err(invalid(format!("scalar field {} has a schema", field.name)))
                }
            }
        }
        Ok(())
    }
}

macro_rules! schema {
    ($module:ident, $name:literal { $($field:ident = $ctor:ident($id:literal, $fname:literal $(, $nested:expr)?);)* }) => {
        pub mod $module {
            #[allow(unused_imports)]
            use super::*;

            $(pub const $field: FieldDescriptor = FieldDescriptor::$ctor($id, $fname $(, $nested)?);)*

            pub const SCHEMA: MessageSchema = MessageSchema::new($name, &[$($field),*]);
        }
    };
}

// ─── Envelope ────────────────────────────────────────────────────────────────

schema!(any, "google.protobuf.Any" {
    TYPE_URL = string(1, "type_url");
    VALUE = bytes(2, "value");
});

schema!(signature, "types.Signature" {
    PUBLIC_KEY = bytes(1, "public_key");
    SIGNATURE = bytes(2, "signature");
});

schema!(transaction, "types.Transaction" {
    MESSAGE_TYPE = string(1, "message_type");
    MSG = message(2, "msg", &any::SCHEMA);
    SIGNATURE = message(3, "signature", &signature::SCHEMA);
    CREATED_HEIGHT = uint64(4, "created_height");
    TIME = uint64(5, "time");
    FEE = uint64(6, "fee");
    MEMO = string(7, "memo");
    NETWORK_ID = uint64(8, "network_id");
    CHAIN_ID = uint64(9, "chain_id");
});

// ─── Parameter wrappers ──────────────────────────────────────────────────────

schema!(uint64_wrapper, "types.UInt64Wrapper" {
    VALUE = uint64(1, "value");
});

schema!(string_wrapper, "types.StringWrapper" {
    VALUE = string(1, "value");
});

// ─── Account & validator messages ────────────────────────────────────────────

schema!(send, "types.MessageSend" {
    FROM_ADDRESS = bytes(1, "from_address");
    TO_ADDRESS = bytes(2, "to_address");
    AMOUNT = uint64(3, "amount");
});

schema!(stake, "types.MessageStake" {
    PUBLIC_KEY = bytes(1, "public_key");
    AMOUNT = uint64(2, "amount");
    COMMITTEES = packed_uint64(3, "committees");
    NET_ADDRESS = string(4, "net_address");
    OUTPUT_ADDRESS = bytes(5, "output_address");
    DELEGATE = bool(6, "delegate");
    COMPOUND = bool(7, "compound");
    SIGNER = bytes(8, "signer");
});

schema!(edit_stake, "types.MessageEditStake" {
    ADDRESS = bytes(1, "address");
    AMOUNT = uint64(2, "amount");
    COMMITTEES = packed_uint64(3, "committees");
    NET_ADDRESS = string(4, "net_address");
    OUTPUT_ADDRESS = bytes(5, "output_address");
    COMPOUND = bool(6, "compound");
    SIGNER = bytes(7, "signer");
});

schema!(unstake, "types.MessageUnstake" {
    ADDRESS = bytes(1, "address");
});

schema!(pause, "types.MessagePause" {
    ADDRESS = bytes(1, "address");
});

schema!(unpause, "types.MessageUnpause" {
    ADDRESS = bytes(1, "address");
});

// ─── Governance ──────────────────────────────────────────────────────────────

schema!(change_parameter, "types.MessageChangeParameter" {
    PARAMETER_SPACE = string(1, "parameter_space");
    PARAMETER_KEY = string(2, "parameter_key");
    PARAMETER_VALUE = message(3, "parameter_value", &any::SCHEMA);
    START_HEIGHT = uint64(4, "start_height");
    END_HEIGHT = uint64(5, "end_height");
    SIGNER = bytes(6, "signer");
});

schema!(dao_transfer, "types.MessageDAOTransfer" {
    ADDRESS = bytes(1, "address");
    AMOUNT = uint64(2, "amount");
    START_HEIGHT = uint64(3, "start_height");
    END_HEIGHT = uint64(4, "end_height");
});

schema!(subsidy, "types.MessageSubsidy" {
    ADDRESS = bytes(1, "address");
    CHAIN_ID = uint64(2, "chain_id");
    AMOUNT = uint64(3, "amount");
    OPCODE = string(4, "opcode");
});

// ─── Swap orders ─────────────────────────────────────────────────────────────

schema!(create_order, "types.MessageCreateOrder" {
    CHAIN_ID = uint64(1, "chain_id");
    DATA = bytes(2, "data");
    AMOUNT_FOR_SALE = uint64(3, "amount_for_sale");
    REQUESTED_AMOUNT = uint64(4, "requested_amount");
    SALES_RECIPIENT_ADDRESS = bytes(5, "sales_recipient_address");
});

schema!(edit_order, "types.MessageEditOrder" {
    ORDER_ID = bytes(1, "order_id");
    CHAIN_ID = uint64(2, "chain_id");
    DATA = bytes(3, "data");
    AMOUNT_FOR_SALE = uint64(4, "amount_for_sale");
    REQUESTED_AMOUNT = uint64(5, "requested_amount");
    SALES_RECIPIENT_ADDRESS = bytes(6, "sales_recipient_address");
});

schema!(delete_order, "types.MessageDeleteOrder" {
    ORDER_ID = bytes(1, "order_id");
    CHAIN_ID = uint64(2, "chain_id");
});

schema!(lock_order, "types.MessageLockOrder" {
    ORDER_ID = bytes(1, "order_id");
    CHAIN_ID = uint64(2, "chain_id");
    BUYER_RECEIVE_ADDRESS = bytes(3, "buyer_receive_address");
    BUYER_SEND_ADDRESS = bytes(4, "buyer_send_address");
    BUYER_CHAIN_DEADLINE = uint64(5, "buyer_chain_deadline");
});

schema!(close_order, "types.MessageCloseOrder" {
    ORDER_ID = bytes(1, "order_id");
    CHAIN_ID = uint64(2, "chain_id");
    CLOSE_ORDER = bool(3, "close_order");
});

// ─── DEX ─────────────────────────────────────────────────────────────────────

schema!(dex_limit_order, "types.MessageDexLimitOrder" {
    CHAIN_ID = uint64(1, "chain_id");
    AMOUNT_FOR_SALE = uint64(2, "amount_for_sale");
    REQUESTED_AMOUNT = uint64(3, "requested_amount");
    ADDRESS = bytes(4, "address");
});

schema!(dex_liquidity_deposit, "types.MessageDexLiquidityDeposit" {
    CHAIN_ID = uint64(1, "chain_id");
    AMOUNT = uint64(2, "amount");
    ADDRESS = bytes(3, "address");
});

schema!(dex_liquidity_withdraw, "types.MessageDexLiquidityWithdraw" {
    CHAIN_ID = uint64(1, "chain_id");
    PERCENT = uint64(2, "percent");
    ADDRESS = bytes(3, "address");
});

// ─── Registry ────────────────────────────────────────────────────────────────

static ALL: &[&MessageSchema] = &[
    &any::SCHEMA,
    &signature::SCHEMA,
    &transaction::SCHEMA,
    &uint64_wrapper::SCHEMA,
    &string_wrapper::SCHEMA,
    &send::SCHEMA,
    &stake::SCHEMA,
    &edit_stake::SCHEMA,
    &unstake::SCHEMA,
    &pause::SCHEMA,
    &unpause::SCHEMA,
    &change_parameter::SCHEMA,
    &dao_transfer::SCHEMA,
    &subsidy::SCHEMA,
    &create_order::SCHEMA,
    &edit_order::SCHEMA,
    &delete_order::SCHEMA,
    &lock_order::SCHEMA,
    &close_order::SCHEMA,
    &dex_limit_order::SCHEMA,
    &dex_liquidity_deposit::SCHEMA,
    &dex_liquidity_withdraw::SCHEMA,
];

lazy_static! {
    static ref REGISTRY: Result<HashMap<&'static str, &'static MessageSchema>, EncodingError> =
        build_registry(ALL);
}

fn build_registry(
    schemas: &[&'static MessageSchema],
) -> Result<HashMap<&'static str, &'static MessageSchema>, EncodingError> {
    let mut registry = HashMap::with_capacity(schemas.len());
    for schema in schemas {
        schema.validate()?;
        if registry.insert(schema.name, *schema).is_some() {
            return Err(EncodingError::InvalidSchema {
                schema: schema.name,
                reason: "registered twice".to_string(),
            });
        }
    }
    tracing::debug!(schemas = registry.len(), "schema registry validated");
    Ok(registry)
}

/// Fails if any schema table is inconsistent. Checked once per process.
pub fn ensure_valid() -> Result<(), EncodingError> {
    REGISTRY.as_ref().map(|_| ()).map_err(Clone::clone)
}

/// Look up a schema by its fully-qualified name or by its `Any` type url.
pub fn lookup(name_or_type_url: &str) -> Result<&'static MessageSchema, EncodingError> {
    let registry = REGISTRY.as_ref().map_err(Clone::clone)?;
    let name = name_or_type_url
        .strip_prefix(TYPE_URL_PREFIX)
        .unwrap_or(name_or_type_url);
    registry
        .get(name)
        .copied()
        .ok_or_else(|| EncodingError::Malformed(format!("unknown message schema {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_valid() {
        ensure_valid().unwrap();
    }

    #[test]
    fn test_lookup_by_name_and_type_url() {
        let by_name = lookup("types.MessageSend").unwrap();
        let by_url = lookup("type.googleapis.com/types.MessageSend").unwrap();
        assert_eq!(by_name.name, by_url.name);
        assert!(lookup("types.Nope").is_err());
    }

    #[test]
    fn test_transaction_field_ids() {
        let ids: Vec<u32> = transaction::SCHEMA.fields.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(transaction::SIGNATURE.wire_type, WireType::Message);
        assert_eq!(
            transaction::MSG.nested.map(|s| s.name),
            Some("google.protobuf.Any")
        );
    }

    #[test]
    fn test_type_url() {
        assert_eq!(
            create_order::SCHEMA.type_url(),
            "type.googleapis.com/types.MessageCreateOrder"
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        const A: FieldDescriptor = FieldDescriptor::uint64(1, "a");
        const B: FieldDescriptor = FieldDescriptor::uint64(1, "b");
        const BAD: MessageSchema = MessageSchema::new("test.Bad", &[A, B]);
        assert!(matches!(
            BAD.validate(),
            Err(EncodingError::InvalidSchema { schema: "test.Bad", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_message_without_schema() {
        const INNER: FieldDescriptor = FieldDescriptor::new(1, "inner", WireType::Message);
        const BAD: MessageSchema = MessageSchema::new("test.Bad", &[INNER]);
        assert!(BAD.validate().is_err());
    }

    #[test]
    fn test_registry_rejects_broken_tables() {
        const DUP_A: FieldDescriptor = FieldDescriptor::uint64(1, "a");
        static BROKEN: MessageSchema = MessageSchema::new("test.Broken", &[DUP_A, DUP_A]);
        assert!(matches!(
            build_registry(&[&send::SCHEMA, &BROKEN]),
            Err(EncodingError::InvalidSchema {
                schema: "test.Broken",
                ..
            })
        ));

        assert!(matches!(
            build_registry(&[&send::SCHEMA, &send::SCHEMA]),
            Err(EncodingError::InvalidSchema { reason, .. }) if reason == "registered twice"
        ));
        assert_eq!(build_registry(ALL).unwrap().len(), ALL.len());
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(send::SCHEMA.field("amount").map(|f| f.id), Some(3));
        assert!(send::SCHEMA.field_by_id(4).is_none());
    }
}
