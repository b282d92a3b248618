use argon2::{Argon2, PasswordVerifier};
use password_hash::{PasswordHash, PasswordHasher, SaltString};
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

use crate::CoreError;

/// Default length of generated session auth tokens, in characters.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Generates a random alphanumeric token of the given length.
pub fn generate_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Hashes a password with Argon2 using a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| CoreError::PasswordHash)
}

/// Verifies a password against a stored Argon2 hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, CoreError> {
    let parsed_hash = PasswordHash::new(hashed).map_err(|_| CoreError::PasswordHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
