//! In-memory implementation of IdentityRepository

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use acct_core::domain::entities::Identity;
use acct_core::errors::{AuthError, DomainError};
use acct_core::repositories::IdentityRepository;

/// Identity store backed by a map keyed by row id
///
/// Email uniqueness is enforced under the write lock.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<HashMap<Uuid, Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        let identities = self.identities.read().await;
        Ok(identities.values().find(|i| i.email == email).cloned())
    }

    async fn create(&self, identity: Identity) -> Result<Identity, DomainError> {
        let mut identities = self.identities.write().await;

        if identities.values().any(|i| i.email == identity.email) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn save(&self, identity: Identity) -> Result<Identity, DomainError> {
        let mut identities = self.identities.write().await;

        if !identities.contains_key(&identity.id) {
            return Err(DomainError::NotFound {
                resource: format!("identity {}", identity.id),
            });
        }
        if identities
            .values()
            .any(|i| i.id != identity.id && i.email == identity.email)
        {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }
}
