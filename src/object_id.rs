//! ObjectId: the `space.type.instance` triplet naming an on-chain object.
//! Only the instance is emitted on the wire, as a varint; space/type are
//! preserved solely in the textual form.

use core::fmt;
use core::str::FromStr;

use crate::error::GrapheneError;

/// Object type enumeration. Indices are part of the wire contract via
/// [`ObjectId::parse`]'s `type_verify` hint (they never appear on the wire
/// themselves, but a caller-supplied hint is checked against this table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ObjectType {
    Null = 0,
    Base = 1,
    Account = 2,
    Asset = 3,
    ForceSettlement = 4,
    CommitteeMember = 5,
    Witness = 6,
    LimitOrder = 7,
    CallOrder = 8,
    Custom = 9,
    Proposal = 10,
    OperationHistory = 11,
    WithdrawPermission = 12,
    VestingBalance = 13,
    Worker = 14,
    Balance = 15,
}

impl ObjectType {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A parsed `space.type.instance` triplet. Wire form is `varint(instance)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectId {
    pub space: u64,
    pub object_type: u64,
    pub instance: u64,
}

impl ObjectId {
    /// Parses `"S.T.I"` (three dot-separated non-negative integers). When
    /// `type_verify` is given, asserts the parsed type index matches it
    /// (a mismatch is [`GrapheneError::MalformedObjectId`], same as a
    /// malformed string).
    pub fn parse(s: &str, type_verify: Option<ObjectType>) -> Result<Self, GrapheneError> {
        let mut parts = s.split('.');
        let space = parts.next().ok_or(GrapheneError::MalformedObjectId)?;
        let object_type = parts.next().ok_or(GrapheneError::MalformedObjectId)?;
        let instance = parts.next().ok_or(GrapheneError::MalformedObjectId)?;
        if parts.next().is_some() {
            return Err(GrapheneError::MalformedObjectId);
        }

        let space: u64 = space.parse().map_err(|_| GrapheneError::MalformedObjectId)?;
        let object_type: u64 = object_type.parse().map_err(|_| GrapheneError::MalformedObjectId)?;
        let instance: u64 = instance.parse().map_err(|_| GrapheneError::MalformedObjectId)?;

        if let Some(expected) = type_verify {
            if object_type != expected.as_u8() as u64 {
                return Err(GrapheneError::MalformedObjectId);
            }
        }

        Ok(Self {
            space,
            object_type,
            instance,
        })
    }

    /// Wire bytes: `varint(instance)` only (space and type never appear).
    pub fn encode(&self) -> Vec<u8> {
        crate::varint::encode_varint(self.instance)
    }
}

impl FromStr for ObjectId {
    type Err = GrapheneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, None)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.space, self.object_type, self.instance)
    }
}
