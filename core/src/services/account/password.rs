//! bcrypt password hashing, run off the async executor

use crate::errors::{DomainError, DomainResult};

/// Hash checked when the email is unknown, so both failure paths pay for bcrypt
pub(crate) const DUMMY_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

/// Hash a password with the given bcrypt cost
pub(crate) async fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
}

/// Check a password against a stored bcrypt hash
pub(crate) async fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password verification task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to verify password: {}", e),
        })
}
