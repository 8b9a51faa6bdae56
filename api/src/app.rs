//! Application factory
//!
//! Builds the Actix-web application from an already wired [`AppState`].

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use crate::handlers::error::json_error_handler;
use crate::middleware::auth::{CredentialVerifier, TokenAuth};
use crate::routes::user::{
    login::login,
    logout::logout,
    password::change_password,
    profile::{get_profile, update_profile},
    register::register,
    AppState,
};

use acct_core::repositories::{IdentityRepository, RevocationRepository};

/// Create and configure the application with all dependencies
pub fn create_app<I, R>(
    app_state: web::Data<AppState<I, R>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    I: IdentityRepository + 'static,
    R: RevocationRepository + 'static,
{
    let verifier: Arc<dyn CredentialVerifier> = app_state.token_service.clone();

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Per-request tracing spans
        .wrap(TracingLogger::default())
        // Liveness endpoints
        .route("/ping", web::get().to(ping))
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/user")
                    .route("/register", web::post().to(register::<I, R>))
                    .route(
                        "/login",
                        web::post().to(login::<I, R>).wrap(TokenAuth::soft()),
                    )
                    .route(
                        "/profile",
                        web::get().to(get_profile::<I, R>).wrap(TokenAuth::strict()),
                    )
                    .route(
                        "/profile",
                        web::put()
                            .to(update_profile::<I, R>)
                            .wrap(TokenAuth::strict()),
                    )
                    .route(
                        "/password",
                        web::put()
                            .to(change_password::<I, R>)
                            .wrap(TokenAuth::strict()),
                    )
                    .route(
                        "/logout",
                        web::post().to(logout::<I, R>).wrap(TokenAuth::strict()),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": "pong" }))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "acct-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "NOT_FOUND",
        "message": "The requested resource was not found"
    }))
}
