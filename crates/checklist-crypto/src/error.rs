//! Error types for signing and token verification.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error in a cryptographic primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature did not verify against the key.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Hex input could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Why a bearer token was not accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Token does not have the `<claims>.<signature>` shape, or a part does
    /// not decode.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Signature does not match the claims under the server's key.
    #[error("invalid token signature")]
    BadSignature,

    /// Token was valid but its lifetime has ended.
    #[error("token expired at {expired_at}")]
    Expired { expired_at: DateTime<Utc> },

    /// Issue time plus lifetime falls outside the representable range.
    #[error("token lifetime out of range")]
    LifetimeOutOfRange,
}

impl From<CryptoError> for TokenError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::VerificationFailed(_) => Self::BadSignature,
            CryptoError::InvalidHex(msg) => Self::Malformed(msg),
        }
    }
}
