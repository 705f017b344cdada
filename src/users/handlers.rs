//! User listing and lookup handlers

use axum::extract::{Extension, Path};
use axum::Json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::auth::UserResponse;
use crate::common::{ApiError, AppState};

/// GET /api/users - List all users (public views, hashes excluded)
pub async fn list_users(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let state = state_lock.read().await.clone();

    let users = sqlx::query_as::<_, UserResponse>(
        r#"
        SELECT id, name, email, city, profile, cover, created_at
        FROM users
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    debug!(user_count = users.len(), "Loaded users list");

    Ok(Json(users))
}

/// GET /api/users/:id - Get a single user
pub async fn get_user_by_id(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, UserResponse>(
        r#"
        SELECT id, name, email, city, profile, cover, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(&user_id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    match user {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound("user not found".to_string())),
    }
}
