use super::models::{LoginRequest, RegisterRequest};
use crate::common::{ValidationResult, Validator};

impl Validator<RegisterRequest> for RegisterRequest {
    fn validate(&self, data: &RegisterRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.trim().is_empty() {
            result.add_error("name", "Name is required");
        }

        if data.email.trim().is_empty() {
            result.add_error("email", "Email is required");
        } else if !is_plausible_email(&data.email) {
            result.add_error("email", "Email must be a valid email address");
        }

        if data.city.trim().is_empty() {
            result.add_error("city", "City is required");
        }

        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        } else if data.password.len() < 6 {
            result.add_error("password", "Password must be at least 6 characters long");
        }

        result
    }
}

impl Validator<LoginRequest> for LoginRequest {
    fn validate(&self, data: &LoginRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.email.trim().is_empty() {
            result.add_error("email", "Email is required");
        } else if !is_plausible_email(&data.email) {
            result.add_error("email", "Email must be a valid email address");
        }

        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        }

        result
    }
}

/// Shape check only: one '@' with a non-empty local part and a dotted domain.
fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        _ => false,
    }
}
