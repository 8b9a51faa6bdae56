//! Error types for authentication, credential handling and input validation

use thiserror::Error;

/// Account and authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are not distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Already logged in")]
    AlreadyLoggedIn,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Identity not found")]
    IdentityNotFound,

    #[error("Old password is incorrect")]
    WrongPassword,
}

/// Credential verification and signing errors
///
/// `Malformed`, `Expired` and `Revoked` are expected outcomes of presenting a
/// bad credential. `SigningFailure` is an internal fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    Malformed,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Token signing failure: {message}")]
    SigningFailure { message: String },
}

impl TokenError {
    /// Whether this is an ordinary rejection rather than an internal fault
    pub fn is_expected(&self) -> bool {
        !matches!(self, TokenError::SigningFailure { .. })
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Name must be at least 3 characters of letters, digits or ._%+-")]
    InvalidName,

    #[error("Password must be 8-72 letters and digits with at least one lowercase, one uppercase and one digit")]
    InvalidPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,
}
