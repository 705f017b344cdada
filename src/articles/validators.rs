use super::models::CreateArticleRequest;
use crate::common::{ValidationResult, Validator};

impl Validator<CreateArticleRequest> for CreateArticleRequest {
    fn validate(&self, data: &CreateArticleRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.title.trim().is_empty() {
            result.add_error("title", "Title is required");
        }

        if data.title.len() > 255 {
            result.add_error("title", "Title must not exceed 255 characters");
        }

        if data.body.trim().is_empty() {
            result.add_error("body", "Body is required");
        }

        result
    }
}
