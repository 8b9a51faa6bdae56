use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{MessageResponse, RegisterRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use acct_core::repositories::{IdentityRepository, RevocationRepository};

use super::AppState;

/// Handler for POST /api/v1/user/register
///
/// # Request Body
///
/// ```json
/// {
///     "name": "alice",
///     "email": "alice@example.com",
///     "password": "Passw0rd",
///     "confirm_password": "Passw0rd"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "message": "Registered successfully"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing or invalid field, or passwords differ
/// - 409 Conflict: Email already registered
pub async fn register<I, R>(
    state: web::Data<AppState<I, R>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    I: IdentityRepository + 'static,
    R: RevocationRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    let request = request.into_inner();

    match state
        .account_service
        .register(
            &request.name,
            &request.email,
            &request.password,
            &request.confirm_password,
        )
        .await
    {
        Ok(_) => HttpResponse::Created().json(MessageResponse::new("Registered successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
