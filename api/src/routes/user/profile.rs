use actix_web::{http::header::AUTHORIZATION, web, HttpResponse};
use validator::Validate;

use crate::dto::{LoginResponse, ProfileResponse, UpdateProfileRequest, UpdateProfileResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AuthContext;

use acct_core::repositories::{IdentityRepository, RevocationRepository};
use acct_core::services::ProfileChanges;

use super::AppState;

/// Handler for GET /api/v1/user/profile
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "name": "alice",
///     "email": "alice@example.com",
///     "registered_at": "2024-01-01T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, expired or revoked token
pub async fn get_profile<I, R>(
    state: web::Data<AppState<I, R>>,
    auth: AuthContext,
) -> HttpResponse
where
    I: IdentityRepository + 'static,
    R: RevocationRepository + 'static,
{
    match state.account_service.profile(&auth.email).await {
        Ok(identity) => HttpResponse::Ok().json(ProfileResponse::from(identity)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/v1/user/profile
///
/// Changing the email revokes the presented token. The credential for the
/// new email is returned both in the body and in the `Authorization` header.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "alice.w",
///     "email": "alice.w@example.com"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid name or email
/// - 401 Unauthorized: Missing, invalid, expired or revoked token
/// - 409 Conflict: Email already registered
pub async fn update_profile<I, R>(
    state: web::Data<AppState<I, R>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse
where
    I: IdentityRepository + 'static,
    R: RevocationRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    let request = request.into_inner();
    let changes = ProfileChanges {
        name: request.name,
        email: request.email,
    };

    let update = match state
        .account_service
        .update_profile(&auth.email, changes, &auth.token)
        .await
    {
        Ok(update) => update,
        Err(error) => return handle_domain_error(&error),
    };

    let token = update.token.and_then(LoginResponse::from_issued);

    let mut response = HttpResponse::Ok();
    if let Some(token) = &token {
        response.insert_header((AUTHORIZATION, format!("Bearer {}", token.token)));
    }

    response.json(UpdateProfileResponse {
        message: "Profile updated".to_string(),
        profile: ProfileResponse::from(update.identity),
        token,
    })
}
