// src/seed.rs
//! Seed the database with sample users and articles.
//!
//! Wipes the existing rows and inserts 10 users (all sharing the password
//! "password") plus 20 articles with random owners and empty liked-by sets.
//!
//! Usage: `cargo run --bin seed`

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use dotenv::dotenv;
use rand::seq::SliceRandom;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod common;

use common::{generate_article_id, generate_user_id, Config};

const NAMES: &[&str] = &[
    "Ada Laurent", "Bram Okafor", "Carla Jensen", "Dmitri Vance", "Elif Aydin",
    "Farid Haddad", "Greta Lindqvist", "Hugo Mercier", "Ines Vidal", "Jonas Brandt",
];

const CITIES: &[&str] = &[
    "Berlin", "Lisbon", "Oslo", "Marseille", "Istanbul",
    "Amman", "Stockholm", "Lyon", "Seville", "Hamburg",
];

const TITLES: &[&str] = &[
    "Notes from a slow morning",
    "What the harbor taught me",
    "On keeping a paper notebook",
    "The case for shorter walks",
    "A field guide to quiet cafes",
    "Why I stopped counting steps",
    "Letters I never sent",
    "The bridge at the end of the street",
    "Cooking for one, properly",
    "Small repairs",
];

const BODIES: &[&str] = &[
    "It started raining before I reached the corner, and I decided that was fine.",
    "There is a particular kind of light in the early afternoon that makes everything look finished.",
    "I keep coming back to the same three streets, and every time they are slightly different.",
    "Nobody tells you how much of it is just showing up again the next day.",
    "The trick, as far as I can tell, is to stop before you want to.",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env();

    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool).await?;

    // Wipe in reverse dependency order
    sqlx::query("DELETE FROM article_likes").execute(&pool).await?;
    sqlx::query("DELETE FROM articles").execute(&pool).await?;
    sqlx::query("DELETE FROM users").execute(&pool).await?;

    // One shared hash keeps seeding fast; every seeded account logs in
    // with the password "password".
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(b"password", &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();

    let mut user_ids = Vec::with_capacity(NAMES.len());

    for (i, (name, city)) in NAMES.iter().zip(CITIES.iter()).enumerate() {
        let id = generate_user_id();
        let email = format!(
            "{}{}@example.com",
            name.to_lowercase().replace(' ', "."),
            i
        );

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, city, created_at)
            VALUES (?, ?, ?, ?, ?, datetime('now'))
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(&email)
        .bind(&hash)
        .bind(city)
        .execute(&pool)
        .await?;

        user_ids.push(id);
    }

    info!(count = user_ids.len(), "Seeded users");

    let mut rng = rand::thread_rng();
    let mut article_count = 0;

    for i in 0..20 {
        let id = generate_article_id();
        let title = TITLES[i % TITLES.len()];
        let body = BODIES[i % BODIES.len()];
        let owner = user_ids
            .choose(&mut rng)
            .expect("user_ids is never empty here");

        sqlx::query(
            r#"
            INSERT INTO articles (id, title, body, image, owner, created_at)
            VALUES (?, ?, ?, NULL, ?, datetime('now'))
            "#,
        )
        .bind(&id)
        .bind(title)
        .bind(body)
        .bind(owner)
        .execute(&pool)
        .await?;

        article_count += 1;
    }

    info!(count = article_count, "Seeded articles");
    info!("Seeding complete");

    Ok(())
}
