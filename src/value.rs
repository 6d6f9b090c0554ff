//! The runtime-reflected value model: every primitive and composite wire
//! type collapses to one tagged sum, `Value`, so serialization is a single
//! match arm instead of a trait object per type.
//!
//! `Object` (a named, ordered field list) is the composite container;
//! [`crate::object_id::ObjectId`] and [`crate::operations::Operation`] wrap
//! `Value`/`Object` for their own specialized wire forms.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::GrapheneError;
use crate::object_id::ObjectId;
use crate::varint::write_varint;

/// One field's value in a [`Object`], or a standalone primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I64(i64),
    /// Unsigned varint (used for counts, tags, and object-id instances).
    Varint(u64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    /// `point_in_time`: little-endian u32 seconds since the Unix epoch.
    PointInTime(u32),
    /// 65-byte compact recoverable signature (1 header byte + 32 r + 32 s).
    /// Emitted raw, with no length prefix (see [`Value::encode`]).
    Signature([u8; 65]),
    ObjectId(ObjectId),
    /// Absent (`None`) or present (`Some`). An empty-bytes inner value also
    /// serializes as absent; see [`encode_optional`] for that one wire
    /// exception.
    Optional(Option<Box<Value>>),
    /// `array<T>`: varint(count) followed by each element's encoding.
    Array(Vec<Value>),
    /// Wire-identical to `Array`; caller supplies canonical order.
    Set(Vec<Value>),
    /// `static_variant<T>`: varint(type_tag) followed by the arm's encoding.
    StaticVariant(u64, Box<Value>),
    /// Zero-byte placeholder (used for `signatures` before signing).
    Void,
    /// A named, ordered field list. The composite-object wire form is the
    /// concatenation of each field's encoding, in declaration order.
    Object(Object),
}

/// A named, ordered sequence of (field name, value) pairs. Field names exist
/// only for JSON rendering; they never appear on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    pub fields: Vec<(String, Value)>,
}

impl Object {
    pub fn new(fields: Vec<(&str, Value)>) -> Self {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    pub fn push(&mut self, name: &str, value: Value) {
        self.fields.push((name.to_string(), value));
    }

    /// Wire bytes: the concatenation of each field's encoding, in
    /// declaration order. No padding, no separators.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (_, value) in &self.fields {
            out.extend_from_slice(&value.encode());
        }
        out
    }
}

impl Value {
    /// Encodes this value to its deterministic wire bytes. Total for every
    /// value constructible through this crate's own API.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Value::U8(v) => vec![*v],
            Value::U16(v) => {
                let mut b = [0u8; 2];
                LittleEndian::write_u16(&mut b, *v);
                b.to_vec()
            }
            Value::U32(v) => {
                let mut b = [0u8; 4];
                LittleEndian::write_u32(&mut b, *v);
                b.to_vec()
            }
            Value::U64(v) => {
                let mut b = [0u8; 8];
                LittleEndian::write_u64(&mut b, *v);
                b.to_vec()
            }
            Value::I64(v) => {
                let mut b = [0u8; 8];
                LittleEndian::write_i64(&mut b, *v);
                b.to_vec()
            }
            Value::Varint(v) => {
                let mut b = Vec::with_capacity(4);
                write_varint(&mut b, *v);
                b
            }
            Value::Bool(v) => vec![u8::from(*v)],
            Value::String(s) => {
                let mut out = Vec::with_capacity(4 + s.len());
                write_varint(&mut out, s.len() as u64);
                out.extend_from_slice(s.as_bytes());
                out
            }
            Value::Bytes(bytes) => {
                let mut out = Vec::with_capacity(4 + bytes.len());
                write_varint(&mut out, bytes.len() as u64);
                out.extend_from_slice(bytes);
                out
            }
            Value::PointInTime(secs) => crate::timestamp::encode_point_in_time(*secs).to_vec(),
            Value::Signature(sig) => sig.to_vec(),
            Value::ObjectId(id) => encode_varint_vec(id.instance),
            Value::Optional(inner) => encode_optional(inner.as_deref()),
            Value::Array(items) | Value::Set(items) => {
                let mut out = Vec::new();
                write_varint(&mut out, items.len() as u64);
                for item in items {
                    out.extend_from_slice(&item.encode());
                }
                out
            }
            Value::StaticVariant(tag, inner) => {
                let mut out = Vec::new();
                write_varint(&mut out, *tag);
                out.extend_from_slice(&inner.encode());
                out
            }
            Value::Void => Vec::new(),
            Value::Object(obj) => obj.encode(),
        }
    }
}

fn encode_varint_vec(n: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(4);
    write_varint(&mut out, n);
    out
}

/// Absent -> `[0x00]`; present -> `[0x01] ++ bytes(v)`, *except* that a
/// present composite whose own encoding is empty also serializes as absent,
/// matching the upstream implementation bit-for-bit (the "empty memo" case).
/// See the Open Question note in DESIGN.md.
fn encode_optional(inner: Option<&Value>) -> Vec<u8> {
    match inner {
        None => vec![0x00],
        Some(v) => {
            let bytes = v.encode();
            if bytes.is_empty() {
                vec![0x00]
            } else {
                let mut out = Vec::with_capacity(1 + bytes.len());
                out.push(0x01);
                out.extend_from_slice(&bytes);
                out
            }
        }
    }
}

#[cfg(feature = "export-json")]
mod json {
    use super::*;

    impl Value {
        /// JSON rendering: optional absent fields are omitted by the caller
        /// (see [`Object::to_json`]); byte arrays and signatures render as
        /// lowercase hex strings. Key/array order here carries no consensus
        /// meaning.
        pub fn to_json(&self) -> serde_json::Value {
            match self {
                Value::U8(v) => serde_json::json!(v),
                Value::U16(v) => serde_json::json!(v),
                Value::U32(v) => serde_json::json!(v),
                Value::U64(v) => serde_json::json!(v),
                Value::I64(v) => serde_json::json!(v),
                Value::Varint(v) => serde_json::json!(v),
                Value::Bool(v) => serde_json::json!(v),
                Value::String(s) => serde_json::json!(s),
                Value::Bytes(bytes) => serde_json::json!(hex::encode(bytes)),
                Value::PointInTime(secs) => serde_json::json!(secs),
                Value::Signature(sig) => serde_json::json!(hex::encode(sig)),
                Value::ObjectId(id) => serde_json::json!(id.to_string()),
                Value::Optional(inner) => match inner {
                    None => serde_json::Value::Null,
                    Some(v) => v.to_json(),
                },
                Value::Array(items) | Value::Set(items) => {
                    serde_json::Value::Array(items.iter().map(Value::to_json).collect())
                }
                Value::StaticVariant(tag, inner) => {
                    serde_json::json!([tag, inner.to_json()])
                }
                Value::Void => serde_json::Value::Null,
                Value::Object(obj) => obj.to_json(),
            }
        }
    }

    impl Object {
        /// An object whose keys are the declared field names; optional
        /// absent fields are omitted entirely (not rendered as `null`).
        pub fn to_json(&self) -> serde_json::Value {
            let mut map = serde_json::Map::with_capacity(self.fields.len());
            for (name, value) in &self.fields {
                if matches!(value, Value::Optional(None)) {
                    continue;
                }
                map.insert(name.clone(), value.to_json());
            }
            serde_json::Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_length_is_additive() {
        let obj = Object::new(vec![
            ("a", Value::U8(1)),
            ("b", Value::U16(2)),
            ("c", Value::Varint(300)),
        ]);
        let expected_len: usize = obj.fields.iter().map(|(_, v)| v.encode().len()).sum();
        assert_eq!(obj.encode().len(), expected_len);
    }

    #[test]
    fn optional_absent_is_single_zero_byte() {
        assert_eq!(Value::Optional(None).encode(), vec![0x00]);
    }

    #[test]
    fn optional_present_prefixes_flag() {
        let v = Value::Optional(Some(Box::new(Value::U8(7))));
        assert_eq!(v.encode(), vec![0x01, 0x07]);
    }

    #[test]
    fn optional_present_but_empty_inner_serializes_as_absent() {
        let v = Value::Optional(Some(Box::new(Value::Void)));
        assert_eq!(v.encode(), vec![0x00]);
    }

    #[test]
    fn array_prefix_is_varint_count() {
        let v = Value::Array(vec![Value::U8(1), Value::U8(2), Value::U8(3)]);
        let bytes = v.encode();
        assert_eq!(bytes[0], 0x03);
        assert_eq!(&bytes[1..], &[1, 2, 3]);
    }

    #[test]
    fn signature_array_has_no_inner_length_prefix() {
        let sigs = Value::Array(vec![Value::Signature([7u8; 65]), Value::Signature([9u8; 65])]);
        let bytes = sigs.encode();
        // varint(2) + 65 + 65, no per-element length prefix.
        assert_eq!(bytes.len(), 1 + 65 * 2);
        assert_eq!(bytes[0], 0x02);
    }

    #[test]
    fn void_is_zero_bytes() {
        assert_eq!(Value::Void.encode(), Vec::<u8>::new());
    }
}
