//! Authentication handlers

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::extractors::AuthedUser;
use super::models::{LoginRequest, RegisterRequest, User, UserResponse};
use super::{password, token};
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState, Validator};

/// POST /api/register
/// Creates a user account.
///
/// # Request Body
/// ```json
/// { "name": "...", "email": "...", "city": "...", "password": "..." }
/// ```
///
/// Returns the created user (public view). Duplicate emails are rejected
/// with field-level detail; the UNIQUE index on `users.email` backs the
/// invariant regardless.
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let validation = payload.validate(&payload);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let state = state_lock.read().await.clone();

    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if existing.is_some() {
        warn!(
            email = %safe_email_log(&payload.email),
            "Registration rejected: email already in use"
        );
        let mut taken = crate::common::ValidationResult::new();
        taken.add_error("email", "Email is already registered");
        return Err(taken.into());
    }

    let hash = password::hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "Password hashing failed during registration");
        ApiError::InternalServer("failed to process password".to_string())
    })?;

    let id = generate_user_id();
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password, city, created_at)
        VALUES (?, ?, ?, ?, ?, datetime('now'))
        "#,
    )
    .bind(&id)
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&hash)
    .bind(&payload.city)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "New user account registered"
    );

    Ok(Json(user.into()))
}

/// POST /api/login
/// Exchanges credentials for a signed token.
///
/// # Response
/// ```json
/// { "token": "<jwt>" }
/// ```
///
/// Unknown email and wrong password produce the same 401 body, so the
/// response doesn't reveal which accounts exist.
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let validation = payload.validate(&payload);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let state = state_lock.read().await.clone();

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let user = match user {
        Some(u) => u,
        None => {
            warn!(
                email = %safe_email_log(&payload.email),
                "Login failed: unknown email"
            );
            return Err(ApiError::Unauthorized(
                "incorrect email or password".to_string(),
            ));
        }
    };

    let matches = password::verify_password(&payload.password, &user.password).map_err(|e| {
        error!(error = %e, user_id = %user.id, "Stored password hash is malformed");
        ApiError::InternalServer("failed to verify password".to_string())
    })?;

    if !matches {
        warn!(user_id = %user.id, "Login failed: wrong password");
        return Err(ApiError::Unauthorized(
            "incorrect email or password".to_string(),
        ));
    }

    let token = token::issue(&user, &state.jwt_secret).map_err(|e| {
        error!(error = %e, user_id = %user.id, "Token encoding failed");
        ApiError::InternalServer("token error".to_string())
    })?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "User logged in"
    );

    Ok(Json(serde_json::json!({ "token": token })))
}

/// GET /api/verify
/// Returns the identity attached to the presented token. Since claims are
/// trusted verbatim, this is a pure echo of the verified snapshot.
pub async fn verify(authed: AuthedUser) -> Json<AuthedUser> {
    Json(authed)
}
