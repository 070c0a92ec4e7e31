//! Password hashing.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hash could not be computed")]
    Hash(argon2::password_hash::Error),

    #[error("stored password hash is malformed")]
    MalformedHash(argon2::password_hash::Error),

    #[error("password hashing task failed")]
    Join(#[source] tokio::task::JoinError),
}

/// Hash a password into a PHC string.
///
/// Runs on the blocking pool; argon2 is deliberately slow.
///
/// # Errors
///
/// Returns an error when hashing fails or the blocking task is cancelled.
pub async fn hash_password(password: &str) -> Result<String, PasswordError> {
    let password = Zeroizing::new(password.to_owned());

    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(PasswordError::Hash)
    })
    .await
    .map_err(PasswordError::Join)?
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns an error when the stored hash cannot be parsed.
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let password = Zeroizing::new(password.to_owned());
    let password_hash = password_hash.to_owned();

    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&password_hash).map_err(PasswordError::MalformedHash)?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(PasswordError::Join)?
}
