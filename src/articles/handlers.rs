//! Article handlers

use axum::{
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use super::likes;
use super::models::{Article, ArticleResponse, ArticleWithOwnerRow, CreateArticleRequest};
use crate::auth::AuthedUser;
use crate::common::{generate_article_id, generate_raw_id, ApiError, AppState, Validator};
use crate::users::uploads::{image_extension, serve_stored_file};

const ARTICLE_WITH_OWNER_SELECT: &str = r#"
    SELECT
        a.id, a.title, a.body, a.image, a.created_at,
        u.id AS owner_id, u.name AS owner_name, u.email AS owner_email,
        u.city AS owner_city, u.profile AS owner_profile, u.cover AS owner_cover,
        u.created_at AS owner_created_at,
        (SELECT GROUP_CONCAT(al.user_id) FROM article_likes al WHERE al.article_id = a.id) AS likes
    FROM articles a
    JOIN users u ON a.owner = u.id
"#;

/// GET /api/articles - All articles, owner embedded, newest first
pub async fn list_articles(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<ArticleResponse>>, ApiError> {
    let state = state_lock.read().await.clone();

    let rows = sqlx::query_as::<_, ArticleWithOwnerRow>(&format!(
        "{} ORDER BY a.created_at DESC, a.id DESC",
        ARTICLE_WITH_OWNER_SELECT
    ))
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let articles: Vec<ArticleResponse> = rows.into_iter().map(Into::into).collect();

    debug!(article_count = articles.len(), "Loaded articles list");

    Ok(Json(articles))
}

/// GET /api/articles/:id - Single article
pub async fn get_article_by_id(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(article_id): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let row = sqlx::query_as::<_, ArticleWithOwnerRow>(&format!(
        "{} WHERE a.id = ?",
        ARTICLE_WITH_OWNER_SELECT
    ))
    .bind(&article_id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    match row {
        Some(row) => Ok(Json(row.into())),
        None => Err(ApiError::NotFound("article not found".to_string())),
    }
}

/// GET /api/articles/profile/:id - Articles owned by a user, newest first
pub async fn list_articles_by_owner(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<ArticleResponse>>, ApiError> {
    let state = state_lock.read().await.clone();

    let rows = sqlx::query_as::<_, ArticleWithOwnerRow>(&format!(
        "{} WHERE a.owner = ? ORDER BY a.created_at DESC, a.id DESC",
        ARTICLE_WITH_OWNER_SELECT
    ))
    .bind(&owner_id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let articles: Vec<ArticleResponse> = rows.into_iter().map(Into::into).collect();

    Ok(Json(articles))
}

/// POST /api/articles - Create an article (auth)
///
/// Multipart fields: `title`, `body`, and an optional `image` file.
pub async fn create_article(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    mut multipart: Multipart,
) -> Result<Json<ArticleResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let mut title = String::new();
    let mut body = String::new();
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("invalid multipart payload".to_string()))?
    {
        match field.name() {
            Some("title") => {
                title = field.text().await.unwrap_or_default();
            }
            Some("body") => {
                body = field.text().await.unwrap_or_default();
            }
            Some("image") => {
                image_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|_| ApiError::BadRequest("invalid image file".to_string()))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let request = CreateArticleRequest { title, body };
    let validation = request.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    // Store the attached image, if any, before touching the database
    let image_filename = match image_data {
        Some(data) => {
            let extension = image_extension(&data).ok_or_else(|| {
                ApiError::BadRequest(
                    "invalid image type. Only JPEG, PNG, GIF, and WebP are supported".to_string(),
                )
            })?;
            let filename = format!("article_{}.{}", generate_raw_id(8), extension);
            let file_path = state.images_dir.join(&filename);
            tokio::fs::write(&file_path, &data).await.map_err(|e| {
                error!(error = %e, file_path = %file_path.display(), "Failed to save article image");
                ApiError::InternalServer("failed to save article image".to_string())
            })?;
            Some(filename)
        }
        None => None,
    };

    let id = generate_article_id();
    sqlx::query(
        r#"
        INSERT INTO articles (id, title, body, image, owner, created_at)
        VALUES (?, ?, ?, ?, ?, datetime('now'))
        "#,
    )
    .bind(&id)
    .bind(&request.title)
    .bind(&request.body)
    .bind(image_filename.as_deref())
    .bind(&authed.id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(article_id = %id, owner = %authed.id, "Article created");

    let row = sqlx::query_as::<_, ArticleWithOwnerRow>(&format!(
        "{} WHERE a.id = ?",
        ARTICLE_WITH_OWNER_SELECT
    ))
    .bind(&id)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(row.into()))
}

/// DELETE /api/articles/:id - Delete an article (auth, owner only)
pub async fn delete_article_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(article_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let article: Option<Article> = sqlx::query_as("SELECT * FROM articles WHERE id = ?")
        .bind(&article_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let article = match article {
        Some(a) => a,
        None => return Err(ApiError::NotFound("article not found".to_string())),
    };

    if article.owner != authed.id {
        return Err(ApiError::Forbidden(
            "only the owner can delete an article".to_string(),
        ));
    }

    delete_article(&state.db, &article_id).await?;

    info!(article_id = %article_id, owner = %authed.id, "Article deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/articles/like/:id - Like an article (auth)
/// Returns the resulting liked-by set.
pub async fn like_article(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(article_id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let state = state_lock.read().await.clone();
    let result = likes::add_like(&state.db, &article_id, &authed.id).await?;
    Ok(Json(result))
}

/// PUT /api/articles/unlike/:id - Unlike an article (auth)
/// Returns the resulting liked-by set.
pub async fn unlike_article(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(article_id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let state = state_lock.read().await.clone();
    let result = likes::remove_like(&state.db, &article_id, &authed.id).await?;
    Ok(Json(result))
}

/// GET /api/images/:filename - Serve stored article images
pub async fn serve_image(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dir = state_lock.read().await.images_dir.clone();
    serve_stored_file(&dir, &filename).await
}

/// Remove an article and its likes rows. Likes go first so a failure
/// between the two statements cannot orphan membership rows.
pub(crate) async fn delete_article(pool: &SqlitePool, article_id: &str) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM article_likes WHERE article_id = ?")
        .bind(article_id)
        .execute(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

    sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(article_id)
        .execute(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(())
}
