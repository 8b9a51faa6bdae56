//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing, lifetime and password hashing configuration
//! - `database` - Store backend and connection pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//!
//! Configuration is layered: built-in defaults for the detected environment,
//! then `config.toml` and `config/<environment>.toml` when present, then
//! `ACCT__`-prefixed environment variables (`ACCT__AUTH__JWT__SECRET=...`).

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use ::config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::{DatabaseBackend, DatabaseConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "ACCT";

/// Separator between nested keys in environment variable overrides
pub const ENV_SEPARATOR: &str = "__";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let database = match environment {
            Environment::Development => DatabaseConfig::memory(),
            _ => DatabaseConfig::default(),
        };

        Self {
            environment,
            server: ServerConfig::default(),
            database,
            auth: AuthConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from defaults, optional TOML files and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        Self::load_from(environment, |builder| {
            builder.add_source(
                EnvironmentSource::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
        })
    }

    /// Load configuration for an environment, letting the caller add the final override layer
    pub fn load_from<F>(environment: Environment, overrides: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(
            ::config::ConfigBuilder<::config::builder::DefaultState>,
        ) -> ::config::ConfigBuilder<::config::builder::DefaultState>,
    {
        let defaults = Config::try_from(&Self::for_environment(environment))?;

        let builder = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(environment.config_file()).required(false));

        overrides(builder).build()?.try_deserialize()
    }

    /// Problems that must stop the server from starting
    pub fn startup_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.auth.jwt.secret.trim().is_empty() {
            problems.push("auth.jwt.secret must not be empty".to_string());
        }
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            problems.push("auth.jwt.secret must be changed in production".to_string());
        }
        problems
    }
}
