//! Identity tokens.
//!
//! A token carries exactly the authenticated user's id and username. It is
//! self-contained: nothing is stored server-side, and no expiry is enforced
//! here. [`HmacTokenCodec`] produces compact HS256 JWS strings:
//!
//! ```text
//! base64url(header) "." base64url(claims) "." base64url(HMAC-SHA256(key, header "." claims))
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

use crate::error::TokenError;
use crate::types::UserId;

type HmacSha256 = Hmac<Sha256>;

/// The only algorithm this codec accepts.
const ALG: &str = "HS256";

/// The validated contents of an identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    pub username: String,
}

impl Claims {
    /// Build claims for a user.
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

/// Mints and parses opaque identity tokens.
pub trait TokenCodec: Send + Sync {
    /// Encode claims into an opaque string.
    fn mint(&self, claims: &Claims) -> Result<String, TokenError>;

    /// Decode and verify a token. Fails closed on anything unexpected.
    fn parse(&self, token: &str) -> Result<Claims, TokenError>;
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// HS256 token codec keyed by a server secret.
#[derive(Clone)]
pub struct HmacTokenCodec {
    key: Vec<u8>,
}

impl HmacTokenCodec {
    /// Create a codec from a signing secret. An empty secret is rejected.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let key = secret.into();
        if key.is_empty() {
            return Err(TokenError::Key("empty signing secret".into()));
        }
        Ok(Self { key })
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.key).map_err(|e| TokenError::Key(e.to_string()))
    }
}

impl fmt::Debug for HmacTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HmacTokenCodec(key_len={})", self.key.len())
    }
}

impl TokenCodec for HmacTokenCodec {
    fn mint(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header {
            alg: ALG.to_string(),
            typ: "JWT".to_string(),
        };
        let header_json =
            serde_json::to_vec(&header).map_err(|e| TokenError::InvalidClaims(e.to_string()))?;
        let claims_json =
            serde_json::to_vec(claims).map_err(|e| TokenError::InvalidClaims(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        let mut parts = token.split('.');
        let (header_b64, claims_b64, signature_b64) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(c), Some(s), None) => (h, c, s),
                _ => return Err(TokenError::Malformed),
            };

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| TokenError::Encoding)?;
        let header: Header =
            serde_json::from_slice(&header_bytes).map_err(|_| TokenError::UnsupportedHeader)?;
        if header.alg != ALG {
            return Err(TokenError::UnsupportedHeader);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Encoding)?;
        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let claims_bytes = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| TokenError::Encoding)?;
        let claims: Claims = serde_json::from_slice(&claims_bytes)
            .map_err(|e| TokenError::InvalidClaims(e.to_string()))?;
        if claims.username.is_empty() {
            return Err(TokenError::InvalidClaims("empty username".into()));
        }

        Ok(claims)
    }
}
