//! In-memory store implementations
//!
//! Selected with `database.backend = "memory"`. State is process-local and
//! lost on restart.

mod identity_repository;
mod revocation_repository;

#[cfg(test)]
mod tests;

pub use identity_repository::InMemoryIdentityRepository;
pub use revocation_repository::InMemoryRevocationRepository;
