//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use super::token;
use crate::common::{ApiError, AppState};

/// Authenticated user extractor
///
/// Validates the bearer token and exposes the identity snapshot embedded in
/// its claims. The snapshot is trusted as-is once the signature checks out;
/// no database access happens here, and a handler taking this extractor
/// never runs for an unauthenticated request.
#[derive(Debug, Serialize)]
pub struct AuthedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub profile: Option<String>,
    pub cover: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Extension containing the AppState
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let jwt_secret = state_lock.read().await.jwt_secret.clone();

        // Extract Bearer token from Authorization header
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let token = match token {
            Some(t) => t,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized("authentication required".into()));
            }
        };

        // Handle "Bearer <token>" format or raw token
        let bare_token = token.strip_prefix("Bearer ").unwrap_or(&token);

        // Responses stay generic on purpose: the client learns the token was
        // rejected, not which check rejected it.
        let claims = match token::verify(bare_token, &jwt_secret) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Token verification failed");
                return Err(ApiError::Unauthorized("invalid token".into()));
            }
        };

        Ok(AuthedUser {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            city: claims.city,
            profile: claims.profile,
            cover: claims.cover,
        })
    }
}
