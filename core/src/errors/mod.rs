//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError, ValidationError};

use acct_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Unauthorized => error_codes::UNAUTHORIZED,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(err) => match err {
                AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
                AuthError::AlreadyLoggedIn => error_codes::ALREADY_LOGGED_IN,
                AuthError::EmailAlreadyRegistered => error_codes::EMAIL_TAKEN,
                AuthError::IdentityNotFound => error_codes::UNAUTHORIZED,
                AuthError::WrongPassword => error_codes::WRONG_PASSWORD,
            },
            DomainError::Token(err) => match err {
                TokenError::Malformed => error_codes::TOKEN_INVALID,
                TokenError::Expired => error_codes::TOKEN_EXPIRED,
                TokenError::Revoked => error_codes::TOKEN_REVOKED,
                TokenError::SigningFailure { .. } => error_codes::INTERNAL_ERROR,
            },
            DomainError::ValidationErr(_) => error_codes::VALIDATION_ERROR,
        }
    }
}

/// Convert DomainError to ErrorResponse
///
/// Internal details are not exposed to clients.
impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        let message = match err {
            DomainError::Internal { .. } | DomainError::Token(TokenError::SigningFailure { .. }) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        ErrorResponse::new(err.error_code(), message)
    }
}
