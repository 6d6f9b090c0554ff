//! Chain descriptors and the built-in registry of known chains.
//!
//! Immutable after compile: global registries are wired as constants, not
//! mutable globals. Callers may look a name up in [`KNOWN_CHAIN_NAMES`] /
//! [`lookup`] or build a [`ChainDescriptor`] directly.

use crate::error::GrapheneError;

/// A chain descriptor: `chain_id` (64 hex chars / 32 bytes) is required;
/// `core_symbol` and `prefix` are informational only and unused by the
/// signer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub chain_id: String,
    pub core_symbol: String,
    pub prefix: String,
}

impl ChainDescriptor {
    /// Decodes `chain_id` to its 32 raw bytes. Fails (`BadChainDescriptor`)
    /// unless it is exactly 64 hex characters.
    pub fn chain_id_bytes(&self) -> Result<[u8; 32], GrapheneError> {
        if self.chain_id.len() != 64 {
            return Err(GrapheneError::BadChainDescriptor);
        }
        let mut out = [0u8; 32];
        hex_decode_into(&self.chain_id, &mut out).ok_or(GrapheneError::BadChainDescriptor)?;
        Ok(out)
    }
}

/// Names recognized by [`lookup`]. `String` fields mean a `const` table
/// can't hold the descriptors themselves, so this is just the name list;
/// `lookup` builds the actual [`ChainDescriptor`] per name.
pub const KNOWN_CHAIN_NAMES: &[&str] = &["BTS", "GPH"];

/// The Graphene test chain descriptor.
pub fn graphene_testnet() -> ChainDescriptor {
    ChainDescriptor {
        chain_id: "b8d1603965b3eb1acba27e62ff59f74efa3154d43a4188d381088ac7cdf35539".to_string(),
        core_symbol: "CORE".to_string(),
        prefix: "GPH".to_string(),
    }
}

/// Looks up a known chain by name. `"GPH"` resolves to the real Graphene
/// testnet descriptor; `"BTS"` resolves to the intentionally-empty
/// placeholder (its `chain_id` decodes to nothing, so signing against it
/// is a `BadChainDescriptor` error).
pub fn lookup(name: &str) -> Option<ChainDescriptor> {
    match name {
        "GPH" => Some(graphene_testnet()),
        "BTS" => Some(ChainDescriptor {
            chain_id: String::new(),
            core_symbol: String::new(),
            prefix: String::new(),
        }),
        _ => None,
    }
}

fn hex_decode_into(s: &str, out: &mut [u8; 32]) -> Option<()> {
    if s.len() != 64 {
        return None;
    }
    let bytes = s.as_bytes();
    for i in 0..32 {
        let hi = hex_digit(bytes[i * 2])?;
        let lo = hex_digit(bytes[i * 2 + 1])?;
        out[i] = (hi << 4) | lo;
    }
    Some(())
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphene_testnet_chain_id_decodes_to_32_bytes() {
        let chain = graphene_testnet();
        let bytes = chain.chain_id_bytes().unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(hex::encode(bytes), chain.chain_id);
    }

    #[test]
    fn bts_placeholder_is_not_signable() {
        let chain = lookup("BTS").unwrap();
        assert_eq!(chain.chain_id_bytes(), Err(GrapheneError::BadChainDescriptor));
    }

    #[test]
    fn unknown_chain_name_is_none() {
        assert!(lookup("NOT_A_CHAIN").is_none());
    }
}
