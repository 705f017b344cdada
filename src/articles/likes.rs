//! Liked-by set mutation
//!
//! Membership lives in `article_likes`, keyed by (article_id, user_id).
//! Both mutations are single atomic statements against that key, so
//! repeated likes collapse to one membership row and concurrent
//! like/unlike calls for different users cannot lose each other's writes.
//! There is no fetch-then-overwrite of the whole set anywhere in this path.

use sqlx::SqlitePool;
use tracing::info;

use crate::common::ApiError;

/// Add `user_id` to the liked-by set of `article_id` if absent.
/// Returns the resulting set. Idempotent.
pub async fn add_like(
    pool: &SqlitePool,
    article_id: &str,
    user_id: &str,
) -> Result<Vec<String>, ApiError> {
    ensure_article_exists(pool, article_id).await?;

    let result = sqlx::query(
        "INSERT OR IGNORE INTO article_likes (article_id, user_id) VALUES (?, ?)",
    )
    .bind(article_id)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() > 0 {
        info!(article_id = %article_id, user_id = %user_id, "Article liked");
    }

    liked_by(pool, article_id).await
}

/// Remove `user_id` from the liked-by set of `article_id`.
/// Returns the resulting set. Removing a non-member is a successful no-op.
pub async fn remove_like(
    pool: &SqlitePool,
    article_id: &str,
    user_id: &str,
) -> Result<Vec<String>, ApiError> {
    ensure_article_exists(pool, article_id).await?;

    let result = sqlx::query("DELETE FROM article_likes WHERE article_id = ? AND user_id = ?")
        .bind(article_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() > 0 {
        info!(article_id = %article_id, user_id = %user_id, "Article unliked");
    }

    liked_by(pool, article_id).await
}

/// The current liked-by set of an article.
pub async fn liked_by(pool: &SqlitePool, article_id: &str) -> Result<Vec<String>, ApiError> {
    sqlx::query_scalar(
        "SELECT user_id FROM article_likes WHERE article_id = ? ORDER BY liked_at, user_id",
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
    .map_err(ApiError::DatabaseError)
}

async fn ensure_article_exists(pool: &SqlitePool, article_id: &str) -> Result<(), ApiError> {
    let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM articles WHERE id = ?")
        .bind(article_id)
        .fetch_optional(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

    if exists.is_none() {
        return Err(ApiError::NotFound("article not found".to_string()));
    }

    Ok(())
}
