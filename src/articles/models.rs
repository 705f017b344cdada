//! Article data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::UserResponse;

/// Article row as stored
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub owner: String,
    pub created_at: Option<String>,
}

/// Article with its owner embedded and the liked-by set attached
#[derive(Serialize, Debug)]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub owner: UserResponse,
    pub created_at: Option<String>,
    pub likes: Vec<String>,
}

/// Fields of a new article, collected from the multipart body
#[derive(Debug)]
pub struct CreateArticleRequest {
    pub title: String,
    pub body: String,
}

/// One row of the article/owner join used by the read endpoints.
/// `likes` arrives as a comma-joined string from GROUP_CONCAT.
#[derive(FromRow, Debug)]
pub struct ArticleWithOwnerRow {
    pub id: String,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub created_at: Option<String>,
    pub owner_id: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_city: String,
    pub owner_profile: Option<String>,
    pub owner_cover: Option<String>,
    pub owner_created_at: Option<String>,
    pub likes: Option<String>,
}

impl From<ArticleWithOwnerRow> for ArticleResponse {
    fn from(row: ArticleWithOwnerRow) -> Self {
        let likes = row
            .likes
            .map(|joined| joined.split(',').map(str::to_string).collect())
            .unwrap_or_default();

        ArticleResponse {
            id: row.id,
            title: row.title,
            body: row.body,
            image: row.image,
            owner: UserResponse {
                id: row.owner_id,
                name: row.owner_name,
                email: row.owner_email,
                city: row.owner_city,
                profile: row.owner_profile,
                cover: row.owner_cover,
                created_at: row.owner_created_at,
            },
            created_at: row.created_at,
            likes,
        }
    }
}
