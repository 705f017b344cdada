// Startup configuration, read from the process environment exactly once.
//
// Handlers never touch `std::env` directly; everything they need flows
// through `Config` into `AppState` at construction time.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub profiles_dir: String,
    pub covers_dir: String,
    pub images_dir: String,
    pub cors_origins: String,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://blog_api.db".to_string());
        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "replace_with_strong_secret".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let profiles_dir =
            env::var("PROFILES_DIR").unwrap_or_else(|_| "./uploads/profiles".to_string());
        let covers_dir = env::var("COVERS_DIR").unwrap_or_else(|_| "./uploads/covers".to_string());
        let images_dir = env::var("IMAGES_DIR").unwrap_or_else(|_| "./uploads/images".to_string());
        let cors_origins = env::var("CORS_ORIGINS").unwrap_or_else(|_| {
            "http://localhost:3000,http://localhost:5173".to_string()
        });

        Self {
            database_url,
            jwt_secret,
            port,
            profiles_dir,
            covers_dir,
            images_dir,
            cors_origins,
        }
    }
}
