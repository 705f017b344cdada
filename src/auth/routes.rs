//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/register` - Create a user account
/// - `POST /api/login` - Exchange credentials for a token
/// - `GET /api/verify` - Echo the identity of a valid token
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/api/verify", get(handlers::verify))
}
