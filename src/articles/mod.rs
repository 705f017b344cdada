//! # Articles Module
//!
//! Article CRUD plus the liked-by set protocol (idempotent like/unlike).

pub mod handlers;
pub mod likes;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::articles_routes;
