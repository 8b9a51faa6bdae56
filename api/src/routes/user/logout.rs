use actix_web::{web, HttpResponse};

use crate::dto::MessageResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use acct_core::repositories::{IdentityRepository, RevocationRepository};

use super::AppState;

/// Handler for POST /api/v1/user/logout
///
/// Revokes the presented token. A replacement minted for this same request
/// is revoked as well.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, expired or revoked token
/// - 500 Internal Server Error: Revocation ledger failure
pub async fn logout<I, R>(state: web::Data<AppState<I, R>>, auth: AuthContext) -> HttpResponse
where
    I: IdentityRepository + 'static,
    R: RevocationRepository + 'static,
{
    if let Err(error) = state.account_service.logout(&auth.token).await {
        return handle_domain_error(&error);
    }

    if let Some(renewed) = &auth.renewed_token {
        if let Err(error) = state.account_service.logout(renewed).await {
            return handle_domain_error(&error);
        }
    }

    HttpResponse::Ok().json(MessageResponse::new("Logged out successfully"))
}
