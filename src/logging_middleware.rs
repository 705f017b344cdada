// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Log JSON request and response bodies at debug level.
///
/// Multipart uploads and served files are passed through untouched; buffering
/// image payloads just to log them would be pure overhead.
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(|ct| ct.starts_with("multipart/"))
        .unwrap_or(false);

    let request = if is_multipart {
        debug!(method = %request.method(), uri = %request.uri(), "Request (multipart body omitted)");
        request
    } else {
        let (parts, body) = request.into_parts();
        let bytes = to_bytes(body, usize::MAX)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        if !bytes.is_empty() {
            if let Ok(body_str) = std::str::from_utf8(&bytes) {
                debug!(
                    method = %parts.method,
                    uri = %parts.uri,
                    request_body = %body_str,
                    "Request"
                );
            }
        }

        Request::from_parts(parts, Body::from(bytes))
    };

    let response = next.run(request).await;

    let json_response = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false);

    if !json_response {
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        if let Ok(body_str) = std::str::from_utf8(&bytes) {
            debug!(status = %parts.status, response_body = %body_str, "Response");
        }
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
