//! Shared utilities and common types for the account service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - The JSON error body returned by the API
//! - Input validators for account fields

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseBackend, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
