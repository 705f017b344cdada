//! User routes

use axum::{
    routing::{get, post},
    Router,
};

use super::{handlers, uploads};

/// Creates and returns the users router
///
/// # Routes
/// - `GET  /api/users` - List users
/// - `GET  /api/users/:id` - Get a single user
/// - `POST /api/users/profile` - Upload a profile image (auth)
/// - `POST /api/users/cover` - Upload a cover image (auth)
/// - `GET  /api/profiles/:filename` - Serve profile images
/// - `GET  /api/covers/:filename` - Serve cover images
pub fn users_routes() -> Router {
    Router::new()
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/profile", post(uploads::upload_profile))
        .route("/api/users/cover", post(uploads::upload_cover))
        .route("/api/users/:id", get(handlers::get_user_by_id))
        .route("/api/profiles/:filename", get(uploads::serve_profile))
        .route("/api/covers/:filename", get(uploads::serve_cover))
}
