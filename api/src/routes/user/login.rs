use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{LoginRequest, LoginResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::OptionalAuth;

use acct_core::errors::{AuthError, DomainError};
use acct_core::repositories::{IdentityRepository, RevocationRepository};

use super::AppState;

/// Handler for POST /api/v1/user/login
///
/// Runs behind soft authentication: a request that already carries a valid
/// credential is refused.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "password": "Passw0rd"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "eyJhbGciOiJIUzI1NiIs...",
///     "expires_at": "2024-01-02T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid field, or already logged in
/// - 401 Unauthorized: Unknown email or wrong password
pub async fn login<I, R>(
    state: web::Data<AppState<I, R>>,
    auth: OptionalAuth,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    I: IdentityRepository + 'static,
    R: RevocationRepository + 'static,
{
    if auth.0.is_some() {
        return handle_domain_error(&AuthError::AlreadyLoggedIn.into());
    }

    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    let issued = match state
        .account_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(issued) => issued,
        Err(error) => return handle_domain_error(&error),
    };

    match LoginResponse::from_issued(issued) {
        Some(response) => HttpResponse::Ok().json(response),
        None => handle_domain_error(&DomainError::Internal {
            message: "issued credential has no valid expiry".to_string(),
        }),
    }
}
