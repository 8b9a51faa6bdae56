//! Account service module
//!
//! Registration, login, profile management, password changes and logout,
//! built on top of the token service and the identity store.

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::{AccountService, ProfileChanges, ProfileUpdate};
