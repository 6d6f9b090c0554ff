//! Operation registry and tagged dispatch.
//!
//! The name/tag mapping is fixed, contiguous, and generated once as a table,
//! not grown at runtime. [`Operation`] pairs a composite body with its tag
//! and wire-encodes as `varint(tag) ++ bytes(body)`.

pub mod transfer;

use crate::error::GrapheneError;
use crate::value::Object;
use crate::varint::write_varint;

pub use transfer::{Asset, Memo, Transfer};

/// The fixed, contiguous operation tag table. Index == wire tag.
pub const OPERATIONS: &[&str] = &[
    "transfer",
    "limit_order_create",
    "limit_order_cancel",
    "call_order_update",
    "fill_order",
    "account_create",
    "account_update",
    "account_whitelist",
    "account_upgrade",
    "account_transfer",
    "asset_create",
    "asset_update",
    "asset_update_bitasset",
    "asset_update_feed_producers",
    "asset_issue",
    "asset_reserve",
    "asset_fund_fee_pool",
    "asset_settle",
    "asset_global_settle",
    "asset_publish_feed",
    "witness_create",
    "witness_update",
    "proposal_create",
    "proposal_update",
    "proposal_delete",
    "withdraw_permission_create",
    "withdraw_permission_update",
    "withdraw_permission_claim",
    "withdraw_permission_delete",
    "committee_member_create",
    "committee_member_update",
    "committee_member_update_global_parameters",
    "vesting_balance_create",
    "vesting_balance_withdraw",
    "worker_create",
    "custom",
    "assert",
    "balance_claim",
    "override_transfer",
    "transfer_to_blind",
    "blind_transfer",
    "transfer_from_blind",
    "asset_settle_cancel",
    "asset_claim_fees",
];

/// Small fixed enumeration used by committee/witness-voting operations.
pub const VOTE_TYPE_COMMITTEE: u8 = 0;
pub const VOTE_TYPE_WITNESS: u8 = 1;
pub const VOTE_TYPE_WORKER: u8 = 2;

/// Looks up the tag for an operation name. Used at *construction* time, so
/// an unknown name is a hard error (unlike [`name_of`], which is a display
/// diagnostic).
pub fn tag_of(name: &str) -> Result<u8, GrapheneError> {
    OPERATIONS
        .iter()
        .position(|&n| n == name)
        .map(|i| i as u8)
        .ok_or(GrapheneError::UnknownOperation)
}

/// Looks up the name for a tag. Tags outside the registry are not an error;
/// they produce a diagnostic name for display purposes only.
pub fn name_of(tag: u64) -> String {
    match OPERATIONS.get(tag as usize) {
        Some(name) => name.to_string(),
        None => format!("Unknown Operation ID {}", tag),
    }
}

/// A tagged operation: a composite body plus its registry tag. Wire form is
/// `varint(tag) ++ bytes(body)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub tag: u8,
    pub body: Object,
}

impl Operation {
    /// Builds a tagged operation by looking up `name` in the registry.
    pub fn new(name: &str, body: Object) -> Result<Self, GrapheneError> {
        Ok(Self {
            tag: tag_of(name)?,
            body,
        })
    }

    /// Builds a tagged operation from an already-known tag (e.g. for
    /// round-tripping a value read off the wire).
    pub fn from_tag(tag: u8, body: Object) -> Self {
        Self { tag, body }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint(&mut out, self.tag as u64);
        out.extend_from_slice(&self.body.encode());
        out
    }

    #[cfg(feature = "export-json")]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!([self.tag, self.body.to_json()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_contiguous_and_matches_spec_order() {
        assert_eq!(OPERATIONS.len(), 44);
        assert_eq!(tag_of("transfer").unwrap(), 0);
        assert_eq!(tag_of("limit_order_create").unwrap(), 1);
        assert_eq!(tag_of("asset_claim_fees").unwrap(), 43);
    }

    #[test]
    fn unknown_name_is_fatal() {
        assert_eq!(tag_of("not_a_real_operation"), Err(GrapheneError::UnknownOperation));
    }

    #[test]
    fn unknown_tag_is_a_display_diagnostic_not_an_error() {
        assert_eq!(name_of(0), "transfer");
        assert_eq!(name_of(9999), "Unknown Operation ID 9999");
    }

    #[test]
    fn tagged_operation_wire_form() {
        let op = Operation::new("transfer", Object::new(vec![])).unwrap();
        assert_eq!(op.encode(), vec![0x00]);
    }
}
