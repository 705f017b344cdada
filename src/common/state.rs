// Application state shared across all modules

use sqlx::SqlitePool;
use std::path::PathBuf;

/// Application state containing the database pool and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub profiles_dir: PathBuf,
    pub covers_dir: PathBuf,
    pub images_dir: PathBuf,
    pub jwt_secret: String,
}
