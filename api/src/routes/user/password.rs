use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{ChangePasswordRequest, MessageResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AuthContext;

use acct_core::repositories::{IdentityRepository, RevocationRepository};

use super::AppState;

/// Handler for PUT /api/v1/user/password
///
/// Existing credentials stay valid after a password change.
///
/// ## Errors
/// - 400 Bad Request: Invalid new password, or wrong current password
/// - 401 Unauthorized: Missing, invalid, expired or revoked token
pub async fn change_password<I, R>(
    state: web::Data<AppState<I, R>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    I: IdentityRepository + 'static,
    R: RevocationRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    match state
        .account_service
        .change_password(&auth.email, &request.old_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password changed")),
        Err(error) => handle_domain_error(&error),
    }
}
