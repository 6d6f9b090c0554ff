// src/error.rs

/// Errors surfaced by the primitive codec, object model, and signer.
///
/// One flat enum covers every failure kind in the system; nothing here is
/// retried internally except the canonical-signature search (see
/// [`crate::signer`]), which is bounded and reports
/// [`GrapheneError::CryptoFailure`] on exhaustion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GrapheneError {
    /// `"S.T.I"` was not three dot-separated non-negative integers, or
    /// `type_verify` did not match the parsed type index.
    MalformedObjectId,

    /// An operation name was not found in the registry at construction time.
    /// (Unknown tags at *display* time are not an error; see
    /// [`crate::operations::name_of`].)
    UnknownOperation,

    /// The chain descriptor was missing `chain_id`, or `chain_id` was not
    /// exactly 64 hex characters (32 bytes).
    BadChainDescriptor,

    /// A timestamp string did not match `YYYY-MM-DDTHH:MM:SS` UTC, or its
    /// epoch seconds did not fit in a `u32`.
    BadTimestamp,

    /// A varint decoded past the u64 ceiling (more than 10 continuation
    /// groups), or the input was truncated mid-group.
    VarintOverflow,

    /// Private-key decoding failed, the canonical-signature search
    /// exhausted its retry budget, or a signature's recovery parameter
    /// could not be determined.
    CryptoFailure(CryptoFailureReason),

    /// Defensive: a composite held a `Value` variant with no defined wire
    /// encoder. Should be unreachable for any value built through this
    /// crate's own constructors.
    EncodingInvariantViolation,
}

/// Detail for [`GrapheneError::CryptoFailure`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CryptoFailureReason {
    /// The supplied private key bytes were not a valid secp256k1 scalar.
    InvalidPrivateKey,
    /// No canonical signature was found within the configured attempt cap.
    CanonicalSignatureExhausted { attempts: u32 },
    /// The signature's header byte did not decode to a valid recovery id,
    /// or recovery with that id did not reproduce a consistent public key.
    RecoveryParameterNotFound,
}

impl core::fmt::Display for GrapheneError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MalformedObjectId => {
                write!(f, "malformed object id (expected \"space.type.instance\")")
            }
            Self::UnknownOperation => write!(f, "unknown operation name"),
            Self::BadChainDescriptor => {
                write!(f, "bad chain descriptor (missing or malformed chain_id)")
            }
            Self::BadTimestamp => write!(f, "timestamp did not match YYYY-MM-DDTHH:MM:SS UTC"),
            Self::VarintOverflow => write!(f, "varint exceeded u64 range or input was truncated"),
            Self::CryptoFailure(reason) => write!(f, "crypto failure: {}", reason),
            Self::EncodingInvariantViolation => write!(f, "value had no defined wire encoder"),
        }
    }
}

impl core::fmt::Display for CryptoFailureReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPrivateKey => write!(f, "invalid private key bytes"),
            Self::CanonicalSignatureExhausted { attempts } => {
                write!(f, "no canonical signature found after {} attempts", attempts)
            }
            Self::RecoveryParameterNotFound => {
                write!(f, "could not recover a public key from the signature")
            }
        }
    }
}

// Enable standard Error trait if the "std" feature is on.
#[cfg(feature = "std")]
impl std::error::Error for GrapheneError {}
#[cfg(feature = "std")]
impl std::error::Error for CryptoFailureReason {}
