//! Transaction serializer and canonical ECDSA signer for Graphene-family
//! chains (BitShares/Steem). See `DESIGN.md` for the grounding ledger.

pub mod chain;
pub mod error;
pub mod object_id;
pub mod operations;
pub mod signer;
pub mod timestamp;
pub mod transaction;
pub mod value;
pub mod varint;

pub use chain::{ChainDescriptor, KNOWN_CHAIN_NAMES};
pub use error::{CryptoFailureReason, GrapheneError};
pub use object_id::{ObjectId, ObjectType};
pub use operations::{Asset, Memo, Operation, Transfer};
pub use transaction::SignedTransaction;
pub use value::{Object, Value};

/// Assembles an unsigned transaction from its header fields and operations.
/// `expiration` is `YYYY-MM-DDTHH:MM:SS` UTC.
pub fn build_signed_transaction(
    ref_block_num: u16,
    ref_block_prefix: u32,
    expiration: &str,
    operations: Vec<Operation>,
) -> Result<SignedTransaction, GrapheneError> {
    SignedTransaction::new(ref_block_num, ref_block_prefix, expiration, operations)
}

/// Wire-encodes a transaction exactly as it stands. The `signatures` field
/// is a zero-byte `Void` placeholder until `sign()` is first called, and an
/// `array<signature>` afterward.
pub fn serialize(tx: &SignedTransaction) -> Vec<u8> {
    tx.encode()
}

/// Signs `tx` against `chain` with each of `private_keys`, appending the
/// resulting compact recoverable signatures to `tx.signatures`. Signing
/// operates on `tx.unsigned_bytes()`, so calling this twice with different
/// key sets accumulates signatures rather than replacing them.
pub fn sign(
    tx: &mut SignedTransaction,
    private_keys: &[[u8; 32]],
    chain: &ChainDescriptor,
) -> Result<(), GrapheneError> {
    let unsigned = tx.unsigned_bytes();
    let mut new_signatures = signer::sign_transaction(chain, &unsigned, private_keys)?;
    tx.signatures.append(&mut new_signatures);
    tx.mark_signed();
    Ok(())
}

/// JSON rendering of a signed (or unsigned) transaction.
#[cfg(feature = "export-json")]
pub fn json(tx: &SignedTransaction) -> serde_json::Value {
    tx.to_json()
}
