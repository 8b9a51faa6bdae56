//! MySQL repository implementations

mod identity_repository_impl;
mod revocation_repository_impl;

pub use identity_repository_impl::MySqlIdentityRepository;
pub use revocation_repository_impl::MySqlRevocationRepository;
