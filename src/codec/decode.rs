//! Schema-driven decoding of canonical bytes back into fields.
//!
//! Fields that were omitted as defaults on encode are simply absent here.

use prost::encoding::{decode_key, decode_varint, WireType as ProtoWireType};

use super::schema::MessageSchema;
use super::{Field, Value, WireType};
use crate::error::EncodingError;

/// Decode `bytes` as a message described by `schema`.
///
/// Unknown field ids are skipped. Repeated occurrences of a scalar field keep
/// the last value, repeated `uint64` occurrences are concatenated. The result
/// is ordered by field id.
pub fn decode(schema: &MessageSchema, bytes: &[u8]) -> Result<Vec<Field>, EncodingError> {
    let mut buf = bytes;
    let mut fields: Vec<Field> = Vec::new();

    while !buf.is_empty() {
        let (id, wire) = decode_key(&mut buf)?;

        let Some(descriptor) = schema.field_by_id(id) else {
            skip_value(wire, &mut buf)?;
            continue;
        };

        let value = match (descriptor.wire_type, wire) {
            (WireType::Uint64, ProtoWireType::Varint) => Value::Uint(decode_varint(&mut buf)?),
            (WireType::Uint32, ProtoWireType::Varint) => {
                let v = decode_varint(&mut buf)?;
                if v > u32::MAX as u64 {
                    return Err(EncodingError::Uint32Overflow { id, value: v });
                }
                Value::Uint(v)
            }
            (WireType::Bool, ProtoWireType::Varint) => Value::Bool(decode_varint(&mut buf)? != 0),
            (WireType::String, ProtoWireType::LengthDelimited) => {
                let raw = take_length_delimited(&mut buf)?;
                let s = std::str::from_utf8(raw).map_err(|_| EncodingError::InvalidUtf8 { id })?;
                Value::String(s.to_string())
            }
            (WireType::Bytes, ProtoWireType::LengthDelimited) => {
                Value::Bytes(take_length_delimited(&mut buf)?.to_vec())
            }
            (WireType::Message, ProtoWireType::LengthDelimited) => {
                let raw = take_length_delimited(&mut buf)?;
                let nested = descriptor.nested.ok_or_else(|| EncodingError::InvalidSchema {
                    schema: schema.name,
                    reason: format!("message field {} has no nested schema", id),
                })?;
                Value::Message(decode(nested, raw)?)
            }
            (WireType::PackedUint64, ProtoWireType::LengthDelimited) => {
                let mut raw = take_length_delimited(&mut buf)?;
                let mut values = Vec::new();
                while !raw.is_empty() {
                    values.push(decode_varint(&mut raw)?);
                }
                Value::PackedUint(values)
            }
            (WireType::PackedUint64, ProtoWireType::Varint) => {
                Value::PackedUint(vec![decode_varint(&mut buf)?])
            }
            (expected, actual) => {
                return Err(EncodingError::Malformed(format!(
                    "field {} has wire type {:?}, schema declares {:?}",
                    id, actual, expected
                )))
            }
        };

        upsert(&mut fields, Field::new(id, descriptor.wire_type, value));
    }

    fields.sort_by_key(|f| f.id);
    Ok(fields)
}

fn upsert(fields: &mut Vec<Field>, field: Field) {
    match fields.iter_mut().find(|f| f.id == field.id) {
        Some(existing) => match (&mut existing.value, field.value) {
            (Value::PackedUint(acc), Value::PackedUint(more)) => acc.extend(more),
            (slot, value) => *slot = value,
        },
        None => fields.push(field),
    }
}

fn take_length_delimited<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], EncodingError> {
    let len = decode_varint(buf)?;
    let len = usize::try_from(len)
        .map_err(|_| EncodingError::Malformed(format!("length {} overflows usize", len)))?;
    if len > buf.len() {
        return Err(EncodingError::Malformed(format!(
            "length {} exceeds remaining {} bytes",
            len,
            buf.len()
        )));
    }
    let (head, rest) = buf.split_at(len);
    *buf = rest;
    Ok(head)
}

fn skip_value(wire: ProtoWireType, buf: &mut &[u8]) -> Result<(), EncodingError> {
    let width = match wire {
        ProtoWireType::Varint => {
            decode_varint(buf)?;
            return Ok(());
        }
        ProtoWireType::LengthDelimited => {
            take_length_delimited(buf)?;
            return Ok(());
        }
        ProtoWireType::SixtyFourBit => 8,
        ProtoWireType::ThirtyTwoBit => 4,
        ProtoWireType::StartGroup | ProtoWireType::EndGroup => {
            return Err(EncodingError::Malformed("groups are not supported".into()))
        }
    };
    if width > buf.len() {
        return Err(EncodingError::Malformed("truncated fixed-width field".into()));
    }
    *buf = &buf[width..];
    Ok(())
}
