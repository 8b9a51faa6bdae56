//! Domain entities representing core business objects.

pub mod credential;
pub mod identity;
pub mod revocation;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use credential::{
    Claims, IssuedToken, RENEWAL_WINDOW_MINUTES, TOKEN_LIFETIME_HOURS, TOKEN_PURPOSE,
};
pub use identity::Identity;
pub use revocation::RevocationEntry;
