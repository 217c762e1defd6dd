//! # Authentication Middleware
//!
//! The service has one user and one shared password. `POST /api/login`
//! compares the submitted password with `APP_PASSWORD` in constant time and
//! issues a signed session token (see `checklist_crypto::token`). Every other
//! `/api` route sits behind [`auth_middleware`], which verifies the bearer
//! token's signature and expiry.
//!
//! ```text
//! Authorization: Bearer <claims-hex>.<signature-hex>
//! ```
//!
//! Rejections answer 401 with a uniform message. The precise reason
//! (missing header, wrong scheme, bad signature, expired) is logged.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use subtle::ConstantTimeEq;

use checklist_crypto::{token, SessionClaims, SessionKey};

use crate::error::AppError;

/// Subject of every session token.
pub const SESSION_SUBJECT: &str = "admin";

/// Auth configuration injected into request extensions.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub key: Arc<SessionKey>,
}

/// Constant-time comparison of a submitted password against the configured
/// one.
///
/// When lengths differ, performs a dummy comparison so the timing does not
/// depend on where the inputs diverge.
pub fn password_matches(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Why a request was refused, for the log line.
#[derive(Debug)]
enum Rejection {
    MissingHeader,
    WrongScheme,
    Token(checklist_crypto::TokenError),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeader => f.write_str("missing authorization header"),
            Self::WrongScheme => f.write_str("authorization header must use Bearer scheme"),
            Self::Token(e) => write!(f, "{e}"),
        }
    }
}

fn authenticate(request: &Request, key: &SessionKey) -> Result<SessionClaims, Rejection> {
    let headers = request.headers();
    if !headers.contains_key(header::AUTHORIZATION) {
        return Err(Rejection::MissingHeader);
    }
    let Authorization(bearer) = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(Rejection::WrongScheme)?;
    token::verify(key, bearer.token(), chrono::Utc::now()).map_err(Rejection::Token)
}

/// Reject requests without a valid, unexpired session token.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let Some(config) = request.extensions().get::<AuthConfig>().cloned() else {
        tracing::error!("auth middleware mounted without AuthConfig");
        return AppError::Unauthorized("Authentication unavailable".into()).into_response();
    };

    match authenticate(&request, &config.key) {
        Ok(claims) => {
            tracing::trace!(subject = %claims.sub, "session accepted");
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(reason) => {
            tracing::warn!(
                %reason,
                path = %request.uri().path(),
                "authentication failed"
            );
            AppError::Unauthorized("Invalid or expired token".into()).into_response()
        }
    }
}
