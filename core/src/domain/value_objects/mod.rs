//! Value objects representing immutable domain concepts.

pub mod authentication;

// Re-export commonly used types
pub use authentication::{Authentication, RenewalHint, VerifiedToken};
