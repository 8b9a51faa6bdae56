pub mod identity;
pub mod revocation;

pub use identity::IdentityRepository;
pub use revocation::RevocationRepository;

#[cfg(test)]
pub use identity::MockIdentityRepository;
#[cfg(test)]
pub use revocation::MockRevocationRepository;
