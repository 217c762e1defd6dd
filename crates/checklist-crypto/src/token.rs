//! # Session Tokens
//!
//! ## Format
//!
//! ```text
//! <hex(claims JSON)>.<hex(Ed25519 signature over the claims JSON bytes)>
//! ```
//!
//! Claims carry the subject, issue time and expiry as Unix seconds. A token
//! verifies only if it splits into exactly two hex parts, the signature
//! matches under the server key, and `now < exp`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;
use crate::hex;
use crate::signing::{SessionKey, SessionSignature};

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Who logged in. The service has a single user, `admin`.
    pub sub: String,
    /// Issued at, Unix seconds.
    pub iat: i64,
    /// Expires at, Unix seconds.
    pub exp: i64,
}

impl SessionClaims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// A freshly issued token and when it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issue a token for `subject`, valid for `ttl` from `now`.
pub fn issue(
    key: &SessionKey,
    subject: &str,
    now: DateTime<Utc>,
    ttl: Duration,
) -> Result<IssuedToken, TokenError> {
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or(TokenError::LifetimeOutOfRange)?;
    let claims = SessionClaims {
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };
    // Serializing a struct of a string and two integers cannot fail.
    let payload = serde_json::to_vec(&claims).unwrap_or_default();
    let signature = key.sign(&payload);
    Ok(IssuedToken {
        token: format!("{}.{}", hex::encode(&payload), signature.to_hex()),
        expires_at: claims.expires_at(),
    })
}

/// Verify `token` under `key` at time `now`.
pub fn verify(key: &SessionKey, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
    let (payload_hex, sig_hex) = token
        .trim()
        .split_once('.')
        .ok_or_else(|| TokenError::Malformed("expected <claims>.<signature>".to_string()))?;
    if sig_hex.contains('.') {
        return Err(TokenError::Malformed("too many token parts".to_string()));
    }

    let payload = hex::decode(payload_hex)?;
    let signature = SessionSignature::from_hex(sig_hex)?;
    key.verify(&payload, &signature)?;

    let claims: SessionClaims = serde_json::from_slice(&payload)
        .map_err(|e| TokenError::Malformed(format!("claims: {e}")))?;
    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired {
            expired_at: claims.expires_at(),
        });
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn issued_token_verifies_until_expiry() {
        let key = SessionKey::from_secret(b"secret");
        let issued = issue(&key, "admin", at(1_000), Duration::hours(1)).unwrap();
        assert_eq!(issued.expires_at, at(4_600));

        let claims = verify(&key, &issued.token, at(4_599)).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iat, 1_000);

        assert_eq!(
            verify(&key, &issued.token, at(4_600)),
            Err(TokenError::Expired { expired_at: at(4_600) })
        );
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let issued = issue(&SessionKey::from_secret(b"a"), "admin", at(0), Duration::days(7)).unwrap();
        let other = SessionKey::from_secret(b"b");
        assert_eq!(verify(&other, &issued.token, at(1)), Err(TokenError::BadSignature));
    }

    #[test]
    fn tampered_claims_are_rejected() {
        let key = SessionKey::from_secret(b"secret");
        let issued = issue(&key, "admin", at(0), Duration::seconds(10)).unwrap();
        let (_, sig) = issued.token.split_once('.').unwrap();
        let forged = SessionClaims {
            sub: "admin".to_string(),
            iat: 0,
            exp: i64::MAX / 2,
        };
        let forged_hex = hex::encode(&serde_json::to_vec(&forged).unwrap());
        let token = format!("{forged_hex}.{sig}");
        assert_eq!(verify(&key, &token, at(1)), Err(TokenError::BadSignature));
    }

    #[test]
    fn lifetime_past_the_calendar_is_an_error() {
        let key = SessionKey::from_secret(b"secret");
        let now = Utc::now();
        let ttl = DateTime::<Utc>::MAX_UTC - now + Duration::days(1);
        assert_eq!(
            issue(&key, "admin", now, ttl),
            Err(TokenError::LifetimeOutOfRange)
        );
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let key = SessionKey::from_secret(b"secret");
        for bad in ["", "abc", "zz.zz", "00.00.00", "admin"] {
            assert!(
                matches!(verify(&key, bad, at(0)), Err(TokenError::Malformed(_))),
                "accepted {bad:?}"
            );
        }
    }
}
