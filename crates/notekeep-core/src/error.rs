//! Error types for Notekeep Core.

use thiserror::Error;

/// Errors from decoding or verifying an identity token.
///
/// Callers above the core collapse every variant into one "invalid
/// credentials" outcome; the detail exists for logs and tests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not three dot-separated segments")]
    Malformed,

    #[error("token segment is not valid base64url")]
    Encoding,

    #[error("unsupported token header")]
    UnsupportedHeader,

    #[error("token signature does not verify")]
    BadSignature,

    #[error("token claims are missing or mistyped: {0}")]
    InvalidClaims(String),

    #[error("token signing key rejected: {0}")]
    Key(String),
}

/// Page parameters outside the accepted bounds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page must be at least 1, got {0}")]
    PageOutOfRange(u32),

    #[error("page size must be between 1 and {max}, got {got}")]
    PageSizeOutOfRange { got: u32, max: u32 },
}

/// Core errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("stored credential is not valid base64")]
    CredentialEncoding(#[from] base64::DecodeError),

    #[error("stored credential too short: {0} bytes")]
    CredentialTooShort(usize),

    #[error("token error: {0}")]
    Token(#[from] TokenError),

    #[error("page error: {0}")]
    Page(#[from] PageError),
}
