//! # checklist-crypto — Session Signing
//!
//! A successful login yields a bearer token that every protected request
//! carries. The token is a signed claim set with an expiry; the server keeps
//! no session table.
//!
//! - [`SessionKey`]: Ed25519 signing key. Derived deterministically from the
//!   configured secret (SHA-256 of the secret is the seed) so tokens survive
//!   restarts, or generated ephemerally when no secret is configured.
//! - [`token`]: issue and verify `<claims-hex>.<signature-hex>` tokens.
//!
//! ## Crate Policy
//!
//! - Private key material is never serialized, logged, or exposed through
//!   `Debug`.
//! - Verification failures are typed ([`TokenError`]) so the API can log
//!   the reason while answering a uniform 401.

pub mod error;
pub mod hex;
pub mod signing;
pub mod token;

pub use error::{CryptoError, TokenError};
pub use signing::{SessionKey, SessionSignature};
pub use token::{IssuedToken, SessionClaims};
