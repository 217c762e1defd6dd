//! # Session Signing Keys
//!
//! Ed25519 keys used to sign session tokens.
//!
//! ## Key Sources
//!
//! - [`SessionKey::from_secret`]: seed = SHA-256(secret). The same secret
//!   always yields the same key, so tokens issued before a restart remain
//!   valid.
//! - [`SessionKey::generate`]: random key from the OS RNG. Tokens die with
//!   the process.

use ed25519_dalek::{Signer, Verifier};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::hex;

/// An Ed25519 signature (64 bytes).
#[derive(Clone, PartialEq, Eq)]
pub struct SessionSignature(pub [u8; 64]);

impl SessionSignature {
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse a signature from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 64] = bytes.try_into().map_err(|v: Vec<u8>| {
            CryptoError::InvalidHex(format!("signature must be 64 bytes, got {}", v.len()))
        })?;
        Ok(Self(arr))
    }
}

impl std::fmt::Debug for SessionSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionSignature({}...)", hex::encode(&self.0[..4]))
    }
}

/// Key pair that signs and verifies session tokens.
///
/// Does not implement `Serialize` or `Clone`; share it behind an `Arc`.
pub struct SessionKey {
    signing_key: ed25519_dalek::SigningKey,
    ephemeral: bool,
}

impl SessionKey {
    /// Derive the key from a configured secret.
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut seed: [u8; 32] = Sha256::digest(secret).into();
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
        seed.zeroize();
        Self {
            signing_key,
            ephemeral: false,
        }
    }

    /// Generate a random, process-lifetime key.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
            ephemeral: true,
        }
    }

    /// Whether the key was generated rather than derived from a secret.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Hex of the public half, safe to log for key identification.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().as_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> SessionSignature {
        SessionSignature(self.signing_key.sign(message).to_bytes())
    }

    pub fn verify(&self, message: &[u8], signature: &SessionSignature) -> Result<(), CryptoError> {
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        self.signing_key
            .verifying_key()
            .verify(message, &sig)
            .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKey")
            .field("public_key", &self.public_key_hex())
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_secret_same_key() {
        let a = SessionKey::from_secret(b"hunter2");
        let b = SessionKey::from_secret(b"hunter2");
        assert_eq!(a.public_key_hex(), b.public_key_hex());
        assert!(!a.is_ephemeral());
    }

    #[test]
    fn different_secrets_differ() {
        let a = SessionKey::from_secret(b"one");
        let b = SessionKey::from_secret(b"two");
        assert_ne!(a.public_key_hex(), b.public_key_hex());
    }

    #[test]
    fn sign_then_verify() {
        let key = SessionKey::generate();
        assert!(key.is_ephemeral());
        let sig = key.sign(b"payload");
        assert!(key.verify(b"payload", &sig).is_ok());
        assert!(key.verify(b"payload!", &sig).is_err());
    }

    #[test]
    fn signature_from_another_key_is_rejected() {
        let a = SessionKey::from_secret(b"a");
        let b = SessionKey::from_secret(b"b");
        let sig = a.sign(b"msg");
        assert!(b.verify(b"msg", &sig).is_err());
    }

    #[test]
    fn signature_hex_length_is_checked() {
        assert!(SessionSignature::from_hex("abcd").is_err());
        let key = SessionKey::generate();
        let sig = key.sign(b"x");
        let parsed = SessionSignature::from_hex(&sig.to_hex()).unwrap();
        assert_eq!(parsed, sig);
    }

    #[test]
    fn debug_hides_private_material() {
        let key = SessionKey::from_secret(b"very-secret");
        let dbg = format!("{key:?}");
        assert!(dbg.contains("public_key"));
        assert!(!dbg.contains("very-secret"));
    }
}
