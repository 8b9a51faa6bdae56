//! Mapping from domain errors to HTTP responses

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use acct_core::errors::{AuthError, DomainError, TokenError};
use acct_shared::errors::{error_codes, ErrorResponse};
use tracing::{debug, error};
use validator::ValidationErrors;

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials | AuthError::IdentityNotFound => StatusCode::UNAUTHORIZED,
            AuthError::AlreadyLoggedIn | AuthError::WrongPassword => StatusCode::BAD_REQUEST,
            AuthError::EmailAlreadyRegistered => StatusCode::CONFLICT,
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::Malformed | TokenError::Expired | TokenError::Revoked => {
                StatusCode::UNAUTHORIZED
            }
            TokenError::SigningFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Server-side failures are logged at error level; everything else is an
/// expected rejection and only logged at debug level.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status.is_server_error() {
        error!(error = %error, "Request failed");
    } else {
        debug!(error = %error, status = status.as_u16(), "Request rejected");
    }

    HttpResponse::build(status).json(ErrorResponse::from(error))
}

/// Response for a request body that failed DTO validation
///
/// Field errors are reported under `details`, keyed by field name.
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    debug!(fields = errors.field_errors().len(), "Request body failed validation");

    HttpResponse::BadRequest().json(response)
}

/// Error handler for `web::JsonConfig`: unreadable bodies become a 400 JSON error
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "Failed to bind request body");

    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        format!("Invalid request body: {}", err),
    ));

    actix_web::error::InternalError::from_response(err, response).into()
}

/// 401 response for a protected route called without a bearer token
pub fn missing_token_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::TOKEN_MISSING,
        "Missing bearer token",
    ))
}
