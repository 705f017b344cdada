//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - Token issuance/verification round-trips
//! - Signature and expiry failure modes
//! - Password hashing properties
//! - Register/login payload validation

#[cfg(test)]
mod tests {
    use super::super::models::{Claims, LoginRequest, RegisterRequest, User};
    use super::super::token::TokenError;
    use super::super::*;
    use crate::common::Validator;
    use chrono::Utc;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    fn sample_user() -> User {
        User {
            id: "U_K7NP3X".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "$argon2id$stored-hash-not-used-here".to_string(),
            city: "Berlin".to_string(),
            profile: Some("profile_U_K7NP3X_A1B2C3D4.png".to_string()),
            cover: None,
            created_at: Some("2024-01-01 00:00:00".to_string()),
        }
    }

    #[test]
    fn test_token_round_trip_preserves_identity_snapshot() {
        let secret = "test_secret_key";
        let user = sample_user();

        let issued = token::issue(&user, secret).expect("Failed to issue token");
        let claims = token::verify(&issued, secret).expect("Failed to verify token");

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, user.name);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.city, user.city);
        assert_eq!(claims.profile, user.profile);
        assert_eq!(claims.cover, user.cover);
    }

    #[test]
    fn test_token_claims_never_carry_the_password_hash() {
        let secret = "test_secret_key";
        let user = sample_user();

        let issued = token::issue(&user, secret).expect("Failed to issue token");
        let claims = token::verify(&issued, secret).unwrap();

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_token_verification_fails_with_wrong_secret() {
        let user = sample_user();
        let issued = token::issue(&user, "secret_one").expect("Failed to issue token");

        let result = token::verify(&issued, "secret_two");
        assert_eq!(result.unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let result = token::verify("not-a-token-at-all", "secret");
        assert_eq!(result.unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let secret = "test_secret_key";
        let claims = Claims {
            sub: "U_K7NP3X".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            city: "Berlin".to_string(),
            profile: None,
            cover: None,
            // Far enough in the past to clear default decode leeway
            exp: (Utc::now().timestamp() - 3600) as usize,
        };

        let stale = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let result = token::verify(&stale, secret);
        assert_eq!(result.unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_password_hash_verifies_and_salts() {
        let hash_one = password::hash_password("secret1").expect("Failed to hash");
        let hash_two = password::hash_password("secret1").expect("Failed to hash");

        // Random salt: same plaintext, different digests
        assert_ne!(hash_one, hash_two);

        assert!(password::verify_password("secret1", &hash_one).unwrap());
        assert!(password::verify_password("secret1", &hash_two).unwrap());
    }

    #[test]
    fn test_wrong_password_is_a_false_not_an_error() {
        let hash = password::hash_password("secret1").expect("Failed to hash");
        assert!(!password::verify_password("secret2", &hash).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        assert!(password::verify_password("secret1", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_register_validation_rejects_short_password() {
        let request = RegisterRequest {
            name: "Test User".to_string(),
            email: "a@x.com".to_string(),
            city: "Berlin".to_string(),
            password: "short".to_string(),
        };

        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "password"));
    }

    #[test]
    fn test_register_validation_rejects_missing_fields() {
        let request = RegisterRequest {
            name: "".to_string(),
            email: "".to_string(),
            city: "".to_string(),
            password: "".to_string(),
        };

        let result = request.validate(&request);
        assert!(!result.is_valid);
        for field in ["name", "email", "city", "password"] {
            assert!(
                result.errors.iter().any(|e| e.field == field),
                "expected an error for field '{}'",
                field
            );
        }
    }

    #[test]
    fn test_register_validation_rejects_bad_email() {
        let request = RegisterRequest {
            name: "Test User".to_string(),
            email: "not-an-email".to_string(),
            city: "Berlin".to_string(),
            password: "secret1".to_string(),
        };

        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "email"));
    }

    #[test]
    fn test_register_validation_accepts_valid_payload() {
        let request = RegisterRequest {
            name: "Test User".to_string(),
            email: "a@x.com".to_string(),
            city: "Berlin".to_string(),
            password: "secret1".to_string(),
        };

        assert!(request.validate(&request).is_valid);
    }

    #[test]
    fn test_login_validation() {
        let request = LoginRequest {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(request.validate(&request).is_valid);

        let request = LoginRequest {
            email: "a@x.com".to_string(),
            password: "".to_string(),
        };
        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "password"));
    }

    async fn test_state() -> std::sync::Arc<tokio::sync::RwLock<crate::common::AppState>> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        crate::common::migrations::run_migrations(&pool)
            .await
            .expect("Failed to create schema");

        std::sync::Arc::new(tokio::sync::RwLock::new(crate::common::AppState {
            db: pool,
            profiles_dir: std::path::PathBuf::from("./uploads/profiles"),
            covers_dir: std::path::PathBuf::from("./uploads/covers"),
            images_dir: std::path::PathBuf::from("./uploads/images"),
            jwt_secret: "test_secret_key".to_string(),
        }))
    }

    #[tokio::test]
    async fn test_register_then_login_returns_a_verifiable_token() {
        use axum::extract::{Extension, Json};

        let state = test_state().await;

        let registered = handlers::register(
            Extension(state.clone()),
            Json(RegisterRequest {
                name: "Test User".to_string(),
                email: "a@x.com".to_string(),
                city: "Berlin".to_string(),
                password: "secret1".to_string(),
            }),
        )
        .await
        .expect("Registration failed")
        .0;

        let login_body = handlers::login(
            Extension(state.clone()),
            Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            }),
        )
        .await
        .expect("Login failed")
        .0;

        let issued = login_body["token"].as_str().expect("No token in response");
        let claims = token::verify(issued, "test_secret_key").expect("Token failed to verify");
        assert_eq!(claims.sub, registered.id);
        assert_eq!(claims.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        use axum::extract::{Extension, Json};
        use crate::common::ApiError;

        let state = test_state().await;

        handlers::register(
            Extension(state.clone()),
            Json(RegisterRequest {
                name: "Test User".to_string(),
                email: "a@x.com".to_string(),
                city: "Berlin".to_string(),
                password: "secret1".to_string(),
            }),
        )
        .await
        .expect("Registration failed");

        let result = handlers::login(
            Extension(state.clone()),
            Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "wrong-password".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_registration_is_rejected() {
        use axum::extract::{Extension, Json};
        use crate::common::ApiError;

        let state = test_state().await;

        let payload = || RegisterRequest {
            name: "Test User".to_string(),
            email: "a@x.com".to_string(),
            city: "Berlin".to_string(),
            password: "secret1".to_string(),
        };

        handlers::register(Extension(state.clone()), Json(payload()))
            .await
            .expect("First registration failed");

        let result = handlers::register(Extension(state.clone()), Json(payload())).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_user_response_drops_the_hash() {
        let user = sample_user();
        let response: UserResponse = user.into();
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["id"], "U_K7NP3X");
        assert_eq!(json["email"], "test@example.com");
    }
}
