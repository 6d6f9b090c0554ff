//! Signed-transaction assembly.
//!
//! Wire form: `ref_block_num(u16) ++ ref_block_prefix(u32) ++
//! expiration(point_in_time) ++ operations(array<tagged_operation>) ++
//! extensions(set<>, always empty) ++ signatures(array<signature>)`.
//!
//! The *unsigned* preimage that gets hashed and signed is this same layout
//! with `signatures` replaced by [`Value::Void`]: the transaction is
//! serialized before `signatures` is populated.

use crate::error::GrapheneError;
use crate::operations::Operation;
use crate::timestamp::parse_point_in_time;
use crate::value::Value;

/// A transaction pending (or carrying) signatures.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub expiration: u32,
    pub operations: Vec<Operation>,
    pub signatures: Vec<[u8; 65]>,
    /// Whether `signatures` has ever been populated by the signer. Before
    /// the first `sign()`, the field is a `Void` placeholder that emits
    /// zero bytes on the wire; afterward it's an `array<signature>`, even if
    /// that array happens to be empty. This is *not* the same thing as
    /// `signatures.is_empty()`; it tracks whether signing ever ran.
    signed: bool,
}

impl SignedTransaction {
    /// Builds an unsigned transaction. `expiration` is an ISO-8601-ish
    /// `point_in_time` string; `signatures` starts empty.
    pub fn new(
        ref_block_num: u16,
        ref_block_prefix: u32,
        expiration: &str,
        operations: Vec<Operation>,
    ) -> Result<Self, GrapheneError> {
        Ok(Self {
            ref_block_num,
            ref_block_prefix,
            expiration: parse_point_in_time(expiration)?,
            operations,
            signatures: Vec::new(),
            signed: false,
        })
    }

    /// Marks `signatures` as populated. Called once by the signer after it
    /// appends the newly produced signatures. Idempotent.
    pub(crate) fn mark_signed(&mut self) {
        self.signed = true;
    }

    fn header_and_body_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.ref_block_num.to_le_bytes());
        out.extend_from_slice(&self.ref_block_prefix.to_le_bytes());
        out.extend_from_slice(&Value::PointInTime(self.expiration).encode());
        crate::varint::write_varint(&mut out, self.operations.len() as u64);
        for op in &self.operations {
            out.extend_from_slice(&op.encode());
        }
        // extensions: set<future_extensions>, always empty in this crate.
        out.extend_from_slice(&Value::Set(vec![]).encode());
        out
    }

    /// The bytes that get hashed and signed: the header/body above with
    /// `signatures` replaced by nothing at all, *not* an empty array, since
    /// `signatures` hasn't been appended yet.
    pub fn unsigned_bytes(&self) -> Vec<u8> {
        self.header_and_body_bytes()
    }

    /// Full wire bytes, including whatever signatures are currently present.
    /// Before the first `sign()` call this is bit-identical to
    /// [`Self::unsigned_bytes`] (`signatures` is a `Void` placeholder that
    /// emits nothing); afterward `signatures` is an `array<signature>`,
    /// even if it happens to be empty.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = self.header_and_body_bytes();
        if self.signed {
            let sigs = Value::Array(self.signatures.iter().map(|s| Value::Signature(*s)).collect());
            out.extend_from_slice(&sigs.encode());
        }
        out
    }

    #[cfg(feature = "export-json")]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ref_block_num": self.ref_block_num,
            "ref_block_prefix": self.ref_block_prefix,
            "expiration": self.expiration,
            "operations": self.operations.iter().map(Operation::to_json).collect::<Vec<_>>(),
            "extensions": [],
            "signatures": self.signatures.iter().map(hex::encode).collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{Asset, Transfer};

    fn sample_tx() -> SignedTransaction {
        let fee = Asset::build(0, "1.3.0").unwrap();
        let amount = Asset::build(100, "1.3.0").unwrap();
        let transfer = Transfer::build(fee, "1.2.1", "1.2.2", amount, None).unwrap();
        let op = Operation::new("transfer", transfer).unwrap();
        SignedTransaction::new(1234, 0xdeadbeef, "1970-01-01T00:00:00", vec![op]).unwrap()
    }

    #[test]
    fn header_fields_are_little_endian() {
        let tx = sample_tx();
        let bytes = tx.encode();
        assert_eq!(&bytes[0..2], &1234u16.to_le_bytes());
        assert_eq!(&bytes[2..6], &0xdeadbeefu32.to_le_bytes());
        assert_eq!(&bytes[6..10], &[0, 0, 0, 0]); // epoch expiration
    }

    #[test]
    fn unsigned_bytes_omit_signatures_entirely() {
        let tx = sample_tx();
        let unsigned = tx.unsigned_bytes();
        let full = tx.encode();
        // signatures is still a Void placeholder before signing => identical bytes.
        assert_eq!(full, unsigned);
    }

    #[test]
    fn signed_bytes_grow_by_exactly_one_signature_plus_count_prefix() {
        let mut tx = sample_tx();
        let before = tx.encode().len();
        tx.signatures.push([1u8; 65]);
        tx.mark_signed();
        let after = tx.encode().len();
        // transitioning Void -> array<signature> adds the varint(1) count
        // prefix as well as the 65 raw signature bytes.
        assert_eq!(after, before + 1 + 65);
    }

    #[test]
    fn rejects_bad_expiration_string() {
        assert!(SignedTransaction::new(0, 0, "not-a-date", vec![]).is_err());
    }
}
