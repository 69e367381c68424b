//! Canonical protobuf encoding.
//!
//! The node verifies signatures over its own proto3 serialization of a
//! transaction, so the bytes produced here must match it exactly:
//!
//! - fields are written in ascending field-id order, whatever order they were given in
//! - a field holding its type's default value (`""`, empty bytes, `0`, `false`,
//!   an empty nested or repeated value) is not written at all
//! - unsigned integers are varints, strings/bytes/nested messages are length-delimited,
//!   repeated `uint64` is packed
//!
//! Field layouts come from the constant tables in [`schema`].

pub mod decode;
pub mod schema;

pub use decode::decode;
pub use schema::{FieldDescriptor, MessageSchema};

use prost::encoding::{encode_key, encode_varint, WireType as ProtoWireType};

use crate::error::EncodingError;

/// Largest length prefix the protobuf wire format accepts (2 GiB - 1).
pub const MAX_LENGTH: usize = i32::MAX as usize;

/// Largest valid protobuf field number.
pub const MAX_FIELD_ID: u32 = (1 << 29) - 1;

/// Declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    String,
    Bytes,
    Uint64,
    Uint32,
    Bool,
    Message,
    PackedUint64,
}

impl WireType {
    fn proto(self) -> ProtoWireType {
        match self {
            WireType::Uint64 | WireType::Uint32 | WireType::Bool => ProtoWireType::Varint,
            WireType::String | WireType::Bytes | WireType::Message | WireType::PackedUint64 => {
                ProtoWireType::LengthDelimited
            }
        }
    }
}

/// Runtime value of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Bytes(Vec<u8>),
    Uint(u64),
    Bool(bool),
    Message(Vec<Field>),
    PackedUint(Vec<u64>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Uint(_) => "integer",
            Value::Bool(_) => "bool",
            Value::Message(_) => "message",
            Value::PackedUint(_) => "repeated integer",
        }
    }

    fn matches(&self, wire_type: WireType) -> bool {
        matches!(
            (wire_type, self),
            (WireType::String, Value::String(_))
                | (WireType::Bytes, Value::Bytes(_))
                | (WireType::Uint64, Value::Uint(_))
                | (WireType::Uint32, Value::Uint(_))
                | (WireType::Bool, Value::Bool(_))
                | (WireType::Message, Value::Message(_))
                | (WireType::PackedUint64, Value::PackedUint(_))
        )
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<Vec<u64>> for Value {
    fn from(v: Vec<u64>) -> Self {
        Value::PackedUint(v)
    }
}

/// One `(field id, wire type, value)` entry of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: u32,
    pub wire_type: WireType,
    pub value: Value,
}

impl Field {
    pub fn new(id: u32, wire_type: WireType, value: Value) -> Self {
        Self {
            id,
            wire_type,
            value,
        }
    }
}

/// Whether `value` is the default for `wire_type` and must be omitted.
///
/// This is the only place the omission rule lives. A value whose kind does
/// not match the wire type is never a default; [`encode`] rejects it.
pub fn is_default_value(wire_type: WireType, value: &Value) -> bool {
    match (wire_type, value) {
        (WireType::String, Value::String(s)) => s.is_empty(),
        (WireType::Bytes, Value::Bytes(b)) => b.is_empty(),
        (WireType::Uint64 | WireType::Uint32, Value::Uint(v)) => *v == 0,
        (WireType::Bool, Value::Bool(b)) => !*b,
        (WireType::Message, Value::Message(fields)) => fields
            .iter()
            .all(|f| f.value.matches(f.wire_type) && is_default_value(f.wire_type, &f.value)),
        (WireType::PackedUint64, Value::PackedUint(values)) => values.is_empty(),
        _ => false,
    }
}

/// Canonically encode one message.
pub fn encode(fields: &[Field]) -> Result<Vec<u8>, EncodingError> {
    let mut buf = Vec::new();
    encode_into(fields, &mut buf)?;
    Ok(buf)
}

fn encode_into(fields: &[Field], buf: &mut Vec<u8>) -> Result<(), EncodingError> {
    let mut ordered: Vec<&Field> = fields.iter().collect();
    ordered.sort_by_key(|f| f.id);

    if let Some(pair) = ordered.windows(2).find(|pair| pair[0].id == pair[1].id) {
        return Err(EncodingError::DuplicateField(pair[0].id));
    }

    for field in ordered {
        check_field(field)?;
        if is_default_value(field.wire_type, &field.value) {
            continue;
        }
        encode_field(field, buf)?;
    }
    Ok(())
}

fn check_field(field: &Field) -> Result<(), EncodingError> {
    if field.id == 0 || field.id > MAX_FIELD_ID {
        return Err(EncodingError::Malformed(format!(
            "field id {} out of range",
            field.id
        )));
    }
    if !field.value.matches(field.wire_type) {
        return Err(EncodingError::WireTypeMismatch {
            id: field.id,
            expected: field.wire_type,
            actual: field.value.kind(),
        });
    }
    if let (WireType::Uint32, Value::Uint(v)) = (field.wire_type, &field.value) {
        if *v > u32::MAX as u64 {
            return Err(EncodingError::Uint32Overflow {
                id: field.id,
                value: *v,
            });
        }
    }
    Ok(())
}

fn encode_field(field: &Field, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
    let id = field.id;
    match &field.value {
        Value::Uint(v) => {
            encode_key(id, field.wire_type.proto(), buf);
            encode_varint(*v, buf);
        }
        Value::Bool(b) => {
            encode_key(id, field.wire_type.proto(), buf);
            encode_varint(u64::from(*b), buf);
        }
        Value::String(s) => encode_length_delimited(id, s.as_bytes(), buf)?,
        Value::Bytes(b) => encode_length_delimited(id, b, buf)?,
        Value::Message(inner) => {
            let nested = encode(inner)?;
            encode_length_delimited(id, &nested, buf)?;
        }
        Value::PackedUint(values) => {
            let mut packed = Vec::with_capacity(values.len());
            for v in values {
                encode_varint(*v, &mut packed);
            }
            encode_length_delimited(id, &packed, buf)?;
        }
    }
    Ok(())
}

fn encode_length_delimited(id: u32, data: &[u8], buf: &mut Vec<u8>) -> Result<(), EncodingError> {
    if data.len() > MAX_LENGTH {
        return Err(EncodingError::LengthOverflow { id, len: data.len() });
    }
    encode_key(id, ProtoWireType::LengthDelimited, buf);
    encode_varint(data.len() as u64, buf);
    buf.extend_from_slice(data);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(id: u32, b: &[u8]) -> Field {
        Field::new(id, WireType::Bytes, Value::Bytes(b.to_vec()))
    }

    fn uint(id: u32, v: u64) -> Field {
        Field::new(id, WireType::Uint64, Value::Uint(v))
    }

    #[test]
    fn test_varint_encoding() {
        assert_eq!(encode(&[uint(1, 1)]).unwrap(), vec![0x08, 0x01]);
        assert_eq!(encode(&[uint(1, 150)]).unwrap(), vec![0x08, 0x96, 0x01]);
        assert_eq!(
            encode(&[uint(2, u64::MAX)]).unwrap(),
            vec![0x10, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
        );
    }

    #[test]
    fn test_string_is_length_prefixed() {
        let field = Field::new(1, WireType::String, Value::String("send".into()));
        assert_eq!(encode(&[field]).unwrap(), b"\x0a\x04send".to_vec());
    }

    #[test]
    fn test_defaults_are_omitted() {
        let fields = vec![
            Field::new(1, WireType::String, Value::String(String::new())),
            bytes(2, &[]),
            uint(3, 0),
            Field::new(4, WireType::Uint32, Value::Uint(0)),
            Field::new(5, WireType::Bool, Value::Bool(false)),
            Field::new(6, WireType::Message, Value::Message(vec![uint(1, 0)])),
            Field::new(7, WireType::PackedUint64, Value::PackedUint(vec![])),
        ];
        assert!(encode(&fields).unwrap().is_empty());
    }

    #[test]
    fn test_send_scenario_is_44_bytes() {
        let fields = vec![bytes(1, &[0xab; 20]), bytes(2, &[0xcd; 20]), uint(3, 0)];
        let out = encode(&fields).unwrap();
        assert_eq!(out.len(), 44);
        assert_eq!(&out[..2], &[0x0a, 20]);
        assert_eq!(&out[22..24], &[0x12, 20]);
    }

    #[test]
    fn test_fields_sorted_by_id() {
        let a = encode(&[uint(3, 7), bytes(1, b"x"), uint(2, 9)]).unwrap();
        let b = encode(&[bytes(1, b"x"), uint(2, 9), uint(3, 7)]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0], 0x0a);
    }

    #[test]
    fn test_nested_message_is_length_prefixed() {
        let inner = vec![uint(1, 5)];
        let out = encode(&[Field::new(3, WireType::Message, Value::Message(inner))]).unwrap();
        assert_eq!(out, vec![0x1a, 0x02, 0x08, 0x05]);
    }

    #[test]
    fn test_packed_repeated() {
        let field = Field::new(3, WireType::PackedUint64, Value::PackedUint(vec![1, 0, 300]));
        assert_eq!(
            encode(&[field]).unwrap(),
            vec![0x1a, 0x04, 0x01, 0x00, 0xac, 0x02]
        );
    }

    #[test]
    fn test_bool_true() {
        let field = Field::new(6, WireType::Bool, Value::Bool(true));
        assert_eq!(encode(&[field]).unwrap(), vec![0x30, 0x01]);
    }

    #[test]
    fn test_wire_type_mismatch() {
        let field = Field::new(1, WireType::Uint64, Value::String("1".into()));
        assert_eq!(
            encode(&[field]),
            Err(EncodingError::WireTypeMismatch {
                id: 1,
                expected: WireType::Uint64,
                actual: "string",
            })
        );
    }

    #[test]
    fn test_mismatch_reported_even_for_default_value() {
        let field = Field::new(1, WireType::Bytes, Value::String(String::new()));
        assert!(matches!(
            encode(&[field]),
            Err(EncodingError::WireTypeMismatch { id: 1, .. })
        ));
    }

    #[test]
    fn test_uint32_overflow() {
        let field = Field::new(2, WireType::Uint32, Value::Uint(u32::MAX as u64 + 1));
        assert!(matches!(
            encode(&[field]),
            Err(EncodingError::Uint32Overflow { id: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        assert_eq!(
            encode(&[uint(1, 1), uint(1, 2)]),
            Err(EncodingError::DuplicateField(1))
        );
    }

    #[test]
    fn test_field_id_zero_rejected() {
        assert!(matches!(
            encode(&[uint(0, 1)]),
            Err(EncodingError::Malformed(_))
        ));
    }

    #[test]
    fn test_is_default_value() {
        assert!(is_default_value(WireType::Uint64, &Value::Uint(0)));
        assert!(!is_default_value(WireType::Uint64, &Value::Uint(1)));
        assert!(is_default_value(WireType::Bool, &Value::Bool(false)));
        assert!(!is_default_value(WireType::Bytes, &Value::Uint(0)));
        assert!(!is_default_value(
            WireType::Message,
            &Value::Message(vec![uint(1, 1)])
        ));
    }
}
