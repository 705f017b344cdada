//! Profile and cover image upload handlers

use axum::{
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use infer::Infer;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs as tokio_fs;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::models::UploadResponse;
use crate::auth::AuthedUser;
use crate::common::{generate_raw_id, ApiError, AppState};

// File size limit: 5MB
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// POST /api/users/profile - Upload a profile image (multipart field "profile")
pub async fn upload_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.id, "Profile image upload initiated");

    let filename =
        store_image_field(multipart, "profile", &state.profiles_dir, &authed.id).await?;

    update_user_image(&state.db, &authed.id, "profile", &filename).await?;

    info!(user_id = %authed.id, filename = %filename, "Profile image updated");

    Ok(Json(UploadResponse {
        filename,
        message: "Profile image updated".to_string(),
    }))
}

/// POST /api/users/cover - Upload a cover image (multipart field "cover")
pub async fn upload_cover(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.id, "Cover image upload initiated");

    let filename = store_image_field(multipart, "cover", &state.covers_dir, &authed.id).await?;

    update_user_image(&state.db, &authed.id, "cover", &filename).await?;

    info!(user_id = %authed.id, filename = %filename, "Cover image updated");

    Ok(Json(UploadResponse {
        filename,
        message: "Cover image updated".to_string(),
    }))
}

/// GET /api/profiles/:filename - Serve stored profile images
pub async fn serve_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dir = state_lock.read().await.profiles_dir.clone();
    serve_stored_file(&dir, &filename).await
}

/// GET /api/covers/:filename - Serve stored cover images
pub async fn serve_cover(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dir = state_lock.read().await.covers_dir.clone();
    serve_stored_file(&dir, &filename).await
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Pull the named file field out of a multipart body, validate it, and write
/// it under `dir`. Returns the generated filename used as the stored
/// reference.
pub(crate) async fn store_image_field(
    mut multipart: Multipart,
    field_name: &str,
    dir: &PathBuf,
    user_id: &str,
) -> Result<String, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("invalid multipart payload".to_string()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::BadRequest("failed to read file data".to_string()))?;

        if data.len() > MAX_FILE_SIZE {
            return Err(ApiError::BadRequest(
                "file size exceeds 5MB limit".to_string(),
            ));
        }

        let extension = image_extension(&data).ok_or_else(|| {
            ApiError::BadRequest(
                "invalid image type. Only JPEG, PNG, GIF, and WebP are supported".to_string(),
            )
        })?;

        let filename = format!("{}_{}_{}.{}", field_name, user_id, generate_raw_id(8), extension);
        let file_path = dir.join(&filename);

        tokio_fs::write(&file_path, &data).await.map_err(|e| {
            error!(error = %e, file_path = %file_path.display(), "Failed to save uploaded file");
            ApiError::InternalServer("failed to save uploaded file".to_string())
        })?;

        return Ok(filename);
    }

    Err(ApiError::BadRequest(format!(
        "no {} file found in upload",
        field_name
    )))
}

async fn update_user_image(
    pool: &SqlitePool,
    user_id: &str,
    column: &str,
    filename: &str,
) -> Result<(), ApiError> {
    // `column` is always one of the two literals above, never user input
    let query = match column {
        "profile" => "UPDATE users SET profile = ? WHERE id = ?",
        _ => "UPDATE users SET cover = ? WHERE id = ?",
    };

    sqlx::query(query)
        .bind(filename)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(())
}

pub(crate) async fn serve_stored_file(
    dir: &PathBuf,
    filename: &str,
) -> Result<(StatusCode, [(&'static str, &'static str); 2], Vec<u8>), ApiError> {
    // Sanitize filename to prevent path traversal
    let safe_filename = sanitize_filename(filename);
    let file_path = dir.join(&safe_filename);

    if !file_path.exists() {
        return Err(ApiError::NotFound("file not found".to_string()));
    }

    let file_content = tokio_fs::read(&file_path)
        .await
        .map_err(|_| ApiError::InternalServer("failed to read stored file".to_string()))?;

    let content_type = content_type_from_extension(&safe_filename);

    Ok((
        StatusCode::OK,
        [
            ("Content-Type", content_type),
            ("Cache-Control", "public, max-age=31536000"),
        ],
        file_content,
    ))
}

/// Sniff the content and return a file extension for supported image types.
pub(crate) fn image_extension(data: &[u8]) -> Option<&'static str> {
    let infer = Infer::new();
    match infer.get(data).map(|info| info.mime_type()) {
        Some("image/jpeg") | Some("image/jpg") => Some("jpg"),
        Some("image/png") => Some("png"),
        Some("image/gif") => Some("gif"),
        Some("image/webp") => Some("webp"),
        _ => None,
    }
}

pub(crate) fn content_type_from_extension(filename: &str) -> &'static str {
    match filename.split('.').last() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

pub(crate) fn sanitize_filename(filename: &str) -> String {
    let cleaned = filename
        .replace("..", "")
        .replace('/', "")
        .replace('\\', "")
        .replace('\0', "");

    // Whitelist safe characters: alphanumeric, dots, hyphens, underscores
    let sanitized: String = cleaned
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '.' || *c == '-' || *c == '_')
        .take(255)
        .collect();

    if sanitized.is_empty() {
        "sanitized_file".to_string()
    } else {
        sanitized
    }
}
