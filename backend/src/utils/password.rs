//! Password hashing and verification.
//!
//! Thin wrapper around bcrypt. Hashing failures are fatal to the request
//! that triggered them; a non-matching password is the ordinary
//! `Ok(false)` result, not an error.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes a plaintext password before it is stored.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
}

/// Verifies a plaintext password against a stored hash.
pub fn verify_password(password: &str, hashed: &str) -> ServiceResult<bool> {
    verify(password, hashed)
        .map_err(|e| ServiceError::internal_error(format!("Password verification failed: {}", e)))
}
