//! Concrete composite builders: `Asset`, `Memo`, and `Transfer`. Every other
//! registered operation is dispatch-only (name/tag lookup); callers build
//! their own bodies with [`crate::value::Object`] directly.

use crate::error::GrapheneError;
use crate::object_id::{ObjectId, ObjectType};
use crate::value::{Object, Value};

/// `Asset { amount: i64, asset_id: ObjectId }`, used by `Transfer`'s `fee`
/// and `amount` fields.
pub struct Asset;

impl Asset {
    pub fn build(amount: i64, asset_id: &str) -> Result<Object, GrapheneError> {
        let id = ObjectId::parse(asset_id, Some(ObjectType::Asset))?;
        Ok(Object::new(vec![
            ("amount", Value::I64(amount)),
            ("asset_id", Value::ObjectId(id)),
        ]))
    }
}

/// `Memo { from: pubkey, to: pubkey, nonce: u64, message: bytes }`.
///
/// Public keys are taken as already-decoded 33-byte compressed points (WIF
/// import/export and address computation are out of this crate's scope).
/// Memo encryption key agreement likewise stays out of scope; `message` is
/// whatever ciphertext (or plaintext) the caller supplies.
pub struct Memo;

impl Memo {
    pub fn build(from: [u8; 33], to: [u8; 33], nonce: u64, message: Vec<u8>) -> Object {
        Object::new(vec![
            ("from", Value::Bytes(from.to_vec())),
            ("to", Value::Bytes(to.to_vec())),
            ("nonce", Value::U64(nonce)),
            ("message", Value::Bytes(message)),
        ])
    }
}

/// `Transfer { fee: Asset, from: account, to: account, amount: Asset, memo: optional<Memo>, extensions: set<> }`.
pub struct Transfer;

impl Transfer {
    pub fn build(
        fee: Object,
        from: &str,
        to: &str,
        amount: Object,
        memo: Option<Object>,
    ) -> Result<Object, GrapheneError> {
        let from_id = ObjectId::parse(from, Some(ObjectType::Account))?;
        let to_id = ObjectId::parse(to, Some(ObjectType::Account))?;
        Ok(Object::new(vec![
            ("fee", Value::Object(fee)),
            ("from", Value::ObjectId(from_id)),
            ("to", Value::ObjectId(to_id)),
            ("amount", Value::Object(amount)),
            ("memo", Value::Optional(memo.map(|m| Box::new(Value::Object(m))))),
            ("extensions", Value::Set(vec![])),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_wire_form() {
        let asset = Asset::build(10, "1.3.0").unwrap();
        assert_eq!(
            Value::Object(asset).encode(),
            vec![0x0a, 0, 0, 0, 0, 0, 0, 0, 0x00]
        );
    }

    #[test]
    fn transfer_with_no_memo_serializes_absent_optional() {
        let fee = Asset::build(0, "1.3.0").unwrap();
        let amount = Asset::build(100, "1.3.0").unwrap();
        let transfer = Transfer::build(fee, "1.2.1", "1.2.2", amount, None).unwrap();
        let bytes = Value::Object(transfer).encode();
        // fee(9) + from(1) + to(1) + amount(9) + memo(1, absent) + extensions(1)
        assert_eq!(bytes.len(), 9 + 1 + 1 + 9 + 1 + 1);
        assert_eq!(bytes[bytes.len() - 2], 0x00, "memo must be the absent-optional zero byte");
    }

    #[test]
    fn transfer_rejects_non_account_object_ids() {
        let fee = Asset::build(0, "1.3.0").unwrap();
        let amount = Asset::build(1, "1.3.0").unwrap();
        assert_eq!(
            Transfer::build(fee, "1.3.0", "1.2.2", amount, None),
            Err(GrapheneError::MalformedObjectId)
        );
    }
}
