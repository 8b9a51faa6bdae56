//! # Account Service Core
//!
//! Core business logic and domain layer for the account service.
//! This crate contains the credential and identity entities, the token
//! issuer/verifier with its revocation ledger, the account use cases,
//! repository interfaces and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, Identity, IssuedToken, RevocationEntry};
pub use domain::value_objects::{Authentication, RenewalHint, VerifiedToken};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{IdentityRepository, RevocationRepository};
pub use services::{
    AccountService, AccountServiceConfig, ProfileChanges, ProfileUpdate, TokenService,
    TokenServiceConfig,
};
