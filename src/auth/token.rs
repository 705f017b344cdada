//! Token issuance and verification
//!
//! Stateless HS256 tokens carrying the identity snapshot from [`Claims`].
//! Verification checks the signature and expiry only; the store is never
//! consulted, so a token stays valid until it expires even if the account
//! changes underneath it.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::fmt;

use super::models::{Claims, User};

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, PartialEq)]
pub enum TokenError {
    /// Signature does not match the server secret (tampered or foreign token)
    InvalidSignature,
    /// Structurally valid but past its expiry claim
    Expired,
    /// Not a structurally valid token at all
    Malformed,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::InvalidSignature => write!(f, "invalid signature"),
            TokenError::Expired => write!(f, "token expired"),
            TokenError::Malformed => write!(f, "malformed token"),
        }
    }
}

/// Issue a signed token for a user. Claims carry the public identity
/// snapshot and a 24-hour expiry; the password hash stays out.
pub fn issue(user: &User, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
    let claims = Claims {
        sub: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        city: user.city.clone(),
        profile: user.profile.clone(),
        cover: user.cover.clone(),
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and return its embedded claims.
pub fn verify(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    })
}
