//! Tests for articles module
//!
//! Validator checks plus store-backed properties of the liked-by set,
//! run against in-memory SQLite.

#[cfg(test)]
mod tests {
    use super::super::models::CreateArticleRequest;
    use super::super::*;
    use crate::common::{migrations, ApiError, Validator};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn setup_pool() -> SqlitePool {
        // A single connection keeps the in-memory database alive and shared
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        migrations::run_migrations(&pool)
            .await
            .expect("Failed to create schema");

        pool
    }

    async fn insert_user(pool: &SqlitePool, id: &str) {
        sqlx::query(
            "INSERT INTO users (id, name, email, password, city) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind("Test User")
        .bind(format!("{}@example.com", id))
        .bind("$argon2id$not-checked-here")
        .bind("Berlin")
        .execute(pool)
        .await
        .expect("Failed to insert user");
    }

    async fn insert_article(pool: &SqlitePool, id: &str, owner: &str) {
        sqlx::query("INSERT INTO articles (id, title, body, owner) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind("A title")
            .bind("A body")
            .bind(owner)
            .execute(pool)
            .await
            .expect("Failed to insert article");
    }

    #[tokio::test]
    async fn test_like_is_idempotent() {
        let pool = setup_pool().await;
        insert_user(&pool, "U_OWNER1").await;
        insert_user(&pool, "U_LIKER1").await;
        insert_article(&pool, "A_TEST01", "U_OWNER1").await;

        let first = likes::add_like(&pool, "A_TEST01", "U_LIKER1").await.unwrap();
        let second = likes::add_like(&pool, "A_TEST01", "U_LIKER1").await.unwrap();

        assert_eq!(first, vec!["U_LIKER1".to_string()]);
        // The repeated like collapses into the same single membership
        assert_eq!(second, vec!["U_LIKER1".to_string()]);
    }

    #[tokio::test]
    async fn test_unlike_non_member_is_a_noop() {
        let pool = setup_pool().await;
        insert_user(&pool, "U_OWNER1").await;
        insert_user(&pool, "U_LIKER1").await;
        insert_user(&pool, "U_LIKER2").await;
        insert_article(&pool, "A_TEST01", "U_OWNER1").await;

        likes::add_like(&pool, "A_TEST01", "U_LIKER1").await.unwrap();

        // U_LIKER2 never liked the article; unlike succeeds and changes nothing
        let result = likes::remove_like(&pool, "A_TEST01", "U_LIKER2").await.unwrap();
        assert_eq!(result, vec!["U_LIKER1".to_string()]);
    }

    #[tokio::test]
    async fn test_unlike_removes_membership() {
        let pool = setup_pool().await;
        insert_user(&pool, "U_OWNER1").await;
        insert_user(&pool, "U_LIKER1").await;
        insert_article(&pool, "A_TEST01", "U_OWNER1").await;

        likes::add_like(&pool, "A_TEST01", "U_LIKER1").await.unwrap();
        let result = likes::remove_like(&pool, "A_TEST01", "U_LIKER1").await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_like_missing_article_is_not_found() {
        let pool = setup_pool().await;
        insert_user(&pool, "U_LIKER1").await;

        let result = likes::add_like(&pool, "A_MISSING", "U_LIKER1").await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));

        let result = likes::remove_like(&pool, "A_MISSING", "U_LIKER1").await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_likes_both_persist() {
        let pool = setup_pool().await;
        insert_user(&pool, "U_OWNER1").await;
        insert_user(&pool, "U_LIKER1").await;
        insert_user(&pool, "U_LIKER2").await;
        insert_article(&pool, "A_TEST01", "U_OWNER1").await;

        // Two logically-concurrent likes interleaving at I/O suspension
        // points. Each mutation is a single atomic statement, so neither
        // can overwrite the other's addition.
        let (first, second) = tokio::join!(
            likes::add_like(&pool, "A_TEST01", "U_LIKER1"),
            likes::add_like(&pool, "A_TEST01", "U_LIKER2"),
        );
        first.unwrap();
        second.unwrap();

        let mut members = likes::liked_by(&pool, "A_TEST01").await.unwrap();
        members.sort();
        assert_eq!(
            members,
            vec!["U_LIKER1".to_string(), "U_LIKER2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_article_removes_its_likes() {
        let pool = setup_pool().await;
        insert_user(&pool, "U_OWNER1").await;
        insert_user(&pool, "U_LIKER1").await;
        insert_article(&pool, "A_TEST01", "U_OWNER1").await;

        likes::add_like(&pool, "A_TEST01", "U_LIKER1").await.unwrap();
        handlers::delete_article(&pool, "A_TEST01").await.unwrap();

        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM article_likes WHERE article_id = ?")
                .bind("A_TEST01")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(remaining, 0);

        let article: Option<(String,)> = sqlx::query_as("SELECT id FROM articles WHERE id = ?")
            .bind("A_TEST01")
            .fetch_optional(&pool)
            .await
            .unwrap();
        assert!(article.is_none());
    }

    #[test]
    fn test_create_article_validation_requires_title_and_body() {
        let request = CreateArticleRequest {
            title: "".to_string(),
            body: "".to_string(),
        };

        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "title"));
        assert!(result.errors.iter().any(|e| e.field == "body"));
    }

    #[test]
    fn test_create_article_validation_rejects_overlong_title() {
        let request = CreateArticleRequest {
            title: "a".repeat(256),
            body: "A body".to_string(),
        };

        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "title"));
    }

    #[test]
    fn test_create_article_validation_accepts_valid_payload() {
        let request = CreateArticleRequest {
            title: "A title".to_string(),
            body: "A body".to_string(),
        };

        assert!(request.validate(&request).is_valid);
    }
}
