//! Password hashing and verification
//!
//! Argon2id with default parameters and a random per-call salt. The output
//! is a self-describing PHC-format string stored in the `password` column,
//! so verification recovers the salt and parameters from the hash itself.
//! A wrong password is `Ok(false)`; only a malformed stored hash is an error.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password. Non-deterministic: the embedded random salt
/// makes repeated calls on the same input produce different strings.
pub fn hash_password(plaintext: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(plaintext.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC-format hash.
pub fn verify_password(
    plaintext: &str,
    hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
