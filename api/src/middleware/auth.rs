//! Bearer-token authentication middleware for the API.
//!
//! The middleware extracts the token from the `Authorization` header,
//! verifies it through the [`CredentialVerifier`] registered in app data and
//! injects an [`AuthContext`] into the request.
//!
//! It works in two modes:
//! 1. Strict: a missing or rejected credential ends the request with 401
//! 2. Soft: a missing or rejected credential leaves the caller anonymous
//!
//! In both modes a credential close to expiry is replaced, and the new token
//! is returned in the `Authorization` response header.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::{HeaderValue, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use acct_core::{
    domain::entities::Claims,
    domain::value_objects::Authentication,
    errors::{DomainError, TokenError},
    repositories::RevocationRepository,
    services::token::TokenService,
};
use acct_shared::errors::{error_codes, ErrorResponse};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::error;

use crate::handlers::error::{handle_domain_error, missing_token_response};

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Subject identity from the credential
    pub email: String,
    /// The raw bearer token presented with the request
    pub token: String,
    /// Claims of the presented credential
    pub claims: Claims,
    /// Replacement minted for this request, returned in the response header
    pub renewed_token: Option<String>,
}

impl AuthContext {
    fn new(token: String, auth: &Authentication) -> Self {
        Self {
            email: auth.email.clone(),
            token,
            claims: auth.claims.clone(),
            renewed_token: auth.replacement.as_ref().map(|issued| issued.token.clone()),
        }
    }
}

/// Object-safe view of the token service used by the middleware
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Strict verification; every failure is an error
    async fn authenticate(&self, token: &str) -> Result<Authentication, TokenError>;

    /// Soft verification; bad credentials yield `None`
    async fn identify(&self, token: Option<&str>) -> Result<Option<Authentication>, TokenError>;
}

#[async_trait]
impl<R: RevocationRepository + 'static> CredentialVerifier for TokenService<R> {
    async fn authenticate(&self, token: &str) -> Result<Authentication, TokenError> {
        TokenService::authenticate(self, token).await
    }

    async fn identify(&self, token: Option<&str>) -> Result<Option<Authentication>, TokenError> {
        TokenService::identify(self, token).await
    }
}

/// How the middleware treats requests without a usable credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Strict,
    Soft,
}

/// Token authentication middleware factory
#[derive(Debug, Clone, Copy)]
pub struct TokenAuth {
    mode: AuthMode,
}

impl TokenAuth {
    /// Reject requests without a valid credential
    pub fn strict() -> Self {
        Self {
            mode: AuthMode::Strict,
        }
    }

    /// Let requests without a valid credential through anonymously
    pub fn soft() -> Self {
        Self {
            mode: AuthMode::Soft,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }
}

impl Default for TokenAuth {
    fn default() -> Self {
        Self::strict()
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenAuthMiddleware {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

/// Token authentication middleware service
pub struct TokenAuthMiddleware<S> {
    service: Rc<S>,
    mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for TokenAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let mode = self.mode;

        Box::pin(async move {
            let verifier = req
                .app_data::<web::Data<Arc<dyn CredentialVerifier>>>()
                .map(|verifier| Arc::clone(verifier.get_ref()));
            let Some(verifier) = verifier else {
                error!("No credential verifier registered in app data");
                let err = DomainError::Internal {
                    message: "credential verifier not configured".to_string(),
                };
                return Ok(reject(req, handle_domain_error(&err)));
            };

            let token = extract_bearer_token(&req);

            let auth = match (mode, token.as_deref()) {
                (AuthMode::Strict, None) => {
                    return Ok(reject(req, missing_token_response()));
                }
                (AuthMode::Strict, Some(token)) => verifier.authenticate(token).await.map(Some),
                (AuthMode::Soft, token) => verifier.identify(token).await,
            };

            let auth = match auth {
                Ok(auth) => auth,
                Err(e) => return Ok(reject(req, handle_domain_error(&DomainError::Token(e)))),
            };

            let mut replacement = None;
            if let (Some(auth), Some(token)) = (auth, token) {
                let context = AuthContext::new(token, &auth);
                replacement = context.renewed_token.clone();
                req.extensions_mut().insert(context);
            }

            let mut response = service.call(req).await?.map_into_left_body();

            // A handler that already set a credential header takes precedence
            if response.headers().contains_key(AUTHORIZATION) {
                replacement = None;
            }

            if let Some(new_token) = replacement {
                match HeaderValue::from_str(&format!("Bearer {}", new_token)) {
                    Ok(value) => {
                        response.headers_mut().insert(AUTHORIZATION, value);
                    }
                    Err(e) => error!(error = %e, "Replacement token is not a valid header value"),
                }
            }

            Ok(response)
        })
    }
}

/// Ends the request with `response` without calling the wrapped service
fn reject<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    req.into_response(response).map_into_right_body()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                let response = HttpResponse::Unauthorized().json(ErrorResponse::new(
                    error_codes::UNAUTHORIZED,
                    "Authentication required",
                ));
                InternalError::from_response("Authentication required", response).into()
            });

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
