//! Mock implementation of IdentityRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Identity;
use crate::errors::{AuthError, DomainError};

use super::r#trait::IdentityRepository;

/// Mock identity repository for testing
pub struct MockIdentityRepository {
    identities: Arc<RwLock<HashMap<Uuid, Identity>>>,
}

impl MockIdentityRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            identities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored identities
    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }
}

impl Default for MockIdentityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityRepository for MockIdentityRepository {
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
