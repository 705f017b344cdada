//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Token claims: a snapshot of the acting identity plus expiry.
///
/// The snapshot is trusted verbatim on verified tokens, so handlers never
/// re-query the users table per request. The password hash is never part
/// of the claims.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub profile: Option<String>,
    pub cover: Option<String>,
    pub exp: usize,
}

/// User database model. `password` holds the PHC-format hash and must
/// never be serialized into a response; convert to [`UserResponse`] first.
#[derive(FromRow, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub city: String,
    pub profile: Option<String>,
    pub cover: Option<String>,
    pub created_at: Option<String>,
}

/// Public view of a user, safe to return from any endpoint
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub profile: Option<String>,
    pub cover: Option<String>,
    pub created_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            city: user.city,
            profile: user.profile,
            cover: user.cover,
            created_at: user.created_at,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub city: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
