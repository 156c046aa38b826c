//! Password hashing
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.

use crate::backend::error::BackendError;

/// Hash a password with the given bcrypt cost
pub async fn hash_password(password: String, cost: u32) -> Result<String, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| BackendError::internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored bcrypt hash
///
/// A malformed stored hash is an internal error, not a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| BackendError::internal(format!("Failed to verify password: {}", e)))
}
