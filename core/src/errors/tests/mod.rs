//! Unit tests for domain error types

use acct_shared::errors::ErrorResponse;

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};

#[test]
fn test_token_error_expected() {
    assert!(TokenError::Malformed.is_expected());
    assert!(TokenError::Expired.is_expected());
    assert!(TokenError::Revoked.is_expected());
    assert!(!TokenError::SigningFailure {
        message: "bad key".to_string()
    }
    .is_expected());
}

#[test]
fn test_bridged_error_codes() {
    let err: DomainError = TokenError::Revoked.into();
    assert_eq!(err.error_code(), "TOKEN_REVOKED");

    let err: DomainError = AuthError::EmailAlreadyRegistered.into();
    assert_eq!(err.error_code(), "EMAIL_TAKEN");

    let err: DomainError = ValidationError::InvalidEmail.into();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_error_response_hides_internal_details() {
    let err: DomainError = TokenError::SigningFailure {
        message: "connection refused".to_string(),
    }
    .into();
    let response = ErrorResponse::from(&err);

    assert_eq!(response.error, "INTERNAL_ERROR");
    assert!(!response.message.contains("connection refused"));
}

#[test]
fn test_error_response_keeps_user_message() {
    let err: DomainError = AuthError::WrongPassword.into();
    let response = ErrorResponse::from(&err);

    assert_eq!(response.error, "WRONG_PASSWORD");
    assert_eq!(response.message, "Old password is incorrect");
}

#[test]
fn test_required_field_message() {
    let err = ValidationError::RequiredField {
        field: "email".to_string(),
    };
    assert_eq!(err.to_string(), "Field required: email");
}
