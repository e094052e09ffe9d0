use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::errors::InternalError;

/// Hash a plaintext password into a salted Argon2id PHC string.
pub fn hash(plaintext: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|e| InternalError::Crypto {
            operation: "hash_password",
            message: e.to_string(),
        })
}

/// Verify a plaintext password against a stored digest.
///
/// A mismatch is an invalid-credentials error; a digest that does not parse
/// is a crypto error, since stored hashes are always produced by [`hash`].
pub fn verify(plaintext: &str, digest: &str) -> Result<(), InternalError> {
    let parsed = PasswordHash::new(digest).map_err(|e| InternalError::Crypto {
        operation: "parse_password_hash",
        message: e.to_string(),
    })?;

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .map_err(|_| InternalError::InvalidCredentials)
}
