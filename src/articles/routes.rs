//! Article routes

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers;

/// Creates and returns the articles router
///
/// # Routes
/// - `GET    /api/articles` - List articles (owner embedded, newest first)
/// - `POST   /api/articles` - Create an article (auth, multipart)
/// - `GET    /api/articles/:id` - Get a single article
/// - `DELETE /api/articles/:id` - Delete an article (auth, owner only)
/// - `GET    /api/articles/profile/:id` - Articles owned by a user
/// - `PUT    /api/articles/like/:id` - Like an article (auth)
/// - `PUT    /api/articles/unlike/:id` - Unlike an article (auth)
/// - `GET    /api/images/:filename` - Serve article images
pub fn articles_routes() -> Router {
    Router::new()
        // NOTE: Specific routes must come BEFORE parameterized routes (:id)
        .route(
            "/api/articles",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/api/articles/profile/:id",
            get(handlers::list_articles_by_owner),
        )
        .route("/api/articles/like/:id", put(handlers::like_article))
        .route("/api/articles/unlike/:id", put(handlers::unlike_article))
        .route(
            "/api/articles/:id",
            get(handlers::get_article_by_id).delete(handlers::delete_article_handler),
        )
        .route("/api/images/:filename", get(handlers::serve_image))
}
