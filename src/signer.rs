//! Canonical ECDSA signing over secp256k1.
//!
//! The signed message is `chain_id_bytes ++ unsigned_tx_bytes`, digested
//! with SHA-256. A signature is only accepted if both `r` and `s` fit in 32
//! bytes with no sign-extension padding needed (DER length 32, i.e. each
//! value's top byte has its high bit clear): Graphene's "canonical
//! signature" requirement. `secp256k1`'s low-S normalization means `s`
//! essentially never fails this; `r` fails it on roughly half of all
//! signatures, so a small bounded retry loop converges quickly in practice.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

use crate::chain::ChainDescriptor;
use crate::error::{CryptoFailureReason, GrapheneError};

/// Signatures are abandoned after this many grinding attempts per key. In
/// practice one or two attempts suffice; this bound only guards against a
/// pathologically unlucky RNG or a broken nonce source.
const MAX_CANONICAL_ATTEMPTS: u32 = 64;

/// Computes the digest that gets signed: `SHA256(chain_id_bytes ++ unsigned_tx_bytes)`.
pub fn signing_digest(chain: &ChainDescriptor, unsigned_tx_bytes: &[u8]) -> Result<[u8; 32], GrapheneError> {
    let chain_id = chain.chain_id_bytes()?;
    let mut hasher = Sha256::new();
    hasher.update(chain_id);
    hasher.update(unsigned_tx_bytes);
    Ok(hasher.finalize().into())
}

/// Signs `unsigned_tx_bytes` under `chain` with each of `private_keys`, in
/// order, deduplicating repeated keys (first occurrence wins). Returns one
/// 65-byte compact recoverable signature per distinct key.
pub fn sign_transaction(
    chain: &ChainDescriptor,
    unsigned_tx_bytes: &[u8],
    private_keys: &[[u8; 32]],
) -> Result<Vec<[u8; 65]>, GrapheneError> {
    let digest = signing_digest(chain, unsigned_tx_bytes)?;
    let secp = Secp256k1::signing_only();

    let mut seen: Vec<[u8; 32]> = Vec::new();
    let mut signatures = Vec::with_capacity(private_keys.len());
    for key_bytes in private_keys {
        if seen.contains(key_bytes) {
            continue;
        }
        seen.push(*key_bytes);
        signatures.push(sign_one(&secp, &digest, key_bytes)?);
    }
    Ok(signatures)
}

fn sign_one(secp: &Secp256k1<secp256k1::SignOnly>, digest: &[u8; 32], key_bytes: &[u8; 32]) -> Result<[u8; 65], GrapheneError> {
    let secret_key = SecretKey::from_slice(key_bytes)
        .map_err(|_| GrapheneError::CryptoFailure(CryptoFailureReason::InvalidPrivateKey))?;
    let message = Message::from_digest(*digest);

    for attempt in 0..MAX_CANONICAL_ATTEMPTS {
        let nonce_data = attempt.to_le_bytes();
        let mut extra_entropy = [0u8; 32];
        extra_entropy[..4].copy_from_slice(&nonce_data);

        let recoverable = secp.sign_ecdsa_recoverable_with_noncedata(&message, &secret_key, &extra_entropy);
        let (recovery_id, compact) = recoverable.serialize_compact();

        if is_canonical(&compact) {
            log::debug!("found canonical signature after {} attempt(s)", attempt + 1);
            let mut out = [0u8; 65];
            out[0] = recovery_header_byte(recovery_id);
            out[1..].copy_from_slice(&compact);
            return Ok(out);
        }
        log::debug!("signature attempt {} was not canonical, retrying with new nonce data", attempt + 1);
    }

    log::warn!("exhausted {} attempts searching for a canonical signature", MAX_CANONICAL_ATTEMPTS);
    Err(GrapheneError::CryptoFailure(CryptoFailureReason::CanonicalSignatureExhausted {
        attempts: MAX_CANONICAL_ATTEMPTS,
    }))
}

/// Canonicality: both `r` (bytes 0..32) and `s` (bytes 32..64) must have
/// their top bit clear, i.e. fit a 32-byte DER integer with no leading zero
/// padding byte.
fn is_canonical(compact: &[u8; 64]) -> bool {
    compact[0] & 0x80 == 0 && compact[32] & 0x80 == 0
}

/// Maps a 0..=3 recovery id to Graphene's compact-signature header byte:
/// `i + 4 (compressed pubkey) + 27 (compact signature)`, landing in
/// `{31, 32, 33, 34}`.
fn recovery_header_byte(id: RecoveryId) -> u8 {
    i32::from(id) as u8 + 4 + 27
}

/// Recovers the compressed public key that produced `signature` over
/// `digest`. Used by callers wanting to verify a signature's owner; the
/// signing path above never calls this itself, since it already knows the
/// signing key's public key.
pub fn recover_public_key(digest: &[u8; 32], signature: &[u8; 65]) -> Result<[u8; 33], GrapheneError> {
    let header = signature[0];
    if !(31..=34).contains(&header) {
        return Err(GrapheneError::CryptoFailure(CryptoFailureReason::RecoveryParameterNotFound));
    }
    let recovery_id = RecoveryId::from_i32((header - 4 - 27) as i32)
        .map_err(|_| GrapheneError::CryptoFailure(CryptoFailureReason::RecoveryParameterNotFound))?;

    let mut compact = [0u8; 64];
    compact.copy_from_slice(&signature[1..]);
    let recoverable = RecoverableSignature::from_compact(&compact, recovery_id)
        .map_err(|_| GrapheneError::CryptoFailure(CryptoFailureReason::RecoveryParameterNotFound))?;

    let secp = Secp256k1::verification_only();
    let message = Message::from_digest(*digest);
    let public_key: PublicKey = secp
        .recover_ecdsa(&message, &recoverable)
        .map_err(|_| GrapheneError::CryptoFailure(CryptoFailureReason::RecoveryParameterNotFound))?;
    Ok(public_key.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::graphene_testnet;

    fn test_key(byte: u8) -> [u8; 32] {
        let mut k = [byte; 32];
        k[0] = k[0].wrapping_add(1); // avoid an all-zero scalar
        k
    }

    #[test]
    fn signatures_are_canonical_and_recoverable() {
        let chain = graphene_testnet();
        let unsigned = b"pretend unsigned transaction bytes".to_vec();
        let key = test_key(7);
        let sigs = sign_transaction(&chain, &unsigned, &[key]).unwrap();
        assert_eq!(sigs.len(), 1);

        let sig = sigs[0];
        assert!((31..=34).contains(&sig[0]));
        assert!(sig[1] & 0x80 == 0, "r must be canonical");
        assert!(sig[33] & 0x80 == 0, "s must be canonical");

        let digest = signing_digest(&chain, &unsigned).unwrap();
        let secp = Secp256k1::signing_only();
        let secret_key = SecretKey::from_slice(&key).unwrap();
        let expected_pubkey = PublicKey::from_secret_key(&secp, &secret_key).serialize();
        let recovered = recover_public_key(&digest, &sig).unwrap();
        assert_eq!(recovered, expected_pubkey);
    }

    #[test]
    fn duplicate_keys_sign_once() {
        let chain = graphene_testnet();
        let unsigned = b"tx".to_vec();
        let key = test_key(3);
        let sigs = sign_transaction(&chain, &unsigned, &[key, key]).unwrap();
        assert_eq!(sigs.len(), 1);
    }

    #[test]
    fn bts_placeholder_chain_is_unsignable() {
        let chain = crate::chain::lookup("BTS").unwrap();
        let result = sign_transaction(&chain, b"tx", &[test_key(1)]);
        assert_eq!(result, Err(GrapheneError::BadChainDescriptor));
    }

    #[test]
    fn invalid_private_key_is_rejected() {
        let chain = graphene_testnet();
        let result = sign_transaction(&chain, b"tx", &[[0u8; 32]]);
        assert_eq!(
            result,
            Err(GrapheneError::CryptoFailure(CryptoFailureReason::InvalidPrivateKey))
        );
    }
}
