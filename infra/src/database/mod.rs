//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Schema bootstrap for the `users` and `revoked_tokens` tables
//! - Repository implementations for identities and the revocation ledger

pub mod connection;
pub mod mysql;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlIdentityRepository, MySqlRevocationRepository};
