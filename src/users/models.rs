//! User endpoint response models

use serde::Serialize;

/// Response for a stored profile/cover upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub message: String,
}
