use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed")]
    Hash,

    #[error("stored password hash is unreadable")]
    CorruptHash,
}

/// Hashes a password with Argon2 and a fresh per-call salt.
pub fn hash(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|_| PasswordError::Hash)?;

    Ok(hashed.to_string())
}

/// Checks a password against a stored hash.
///
/// A mismatch is `Ok(false)`; the error covers only a stored hash that
/// cannot be parsed at all.
pub fn verify(plain: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::CorruptHash)?;

    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
