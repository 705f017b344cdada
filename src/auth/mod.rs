//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Registration and password login
//! - Password hashing and verification
//! - Token generation and validation
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod token;
pub mod validators;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::{User, UserResponse};
pub use routes::auth_routes;
