//! Unit tests for mock identity repository implementation

use crate::domain::entities::Identity;
use crate::errors::{AuthError, DomainError};
use crate::repositories::identity::{IdentityRepository, MockIdentityRepository};

fn identity(name: &str, email: &str) -> Identity {
    Identity::new(name.to_string(), email.to_string(), "hash".to_string())
}

#[tokio::test]
async fn test_create_and_find_by_email() {
    let repo = MockIdentityRepository::new();
    let created = repo.create(identity("alice", "alice@example.com")).await.unwrap();

    let found = repo.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(found, Some(created));
    assert!(repo.exists("alice@example.com").await.unwrap());
    assert!(!repo.exists("bob@example.com").await.unwrap());
}

#[tokio::test]
async fn test_create_duplicate_email() {
    let repo = MockIdentityRepository::new();
    repo.create(identity("alice", "alice@example.com")).await.unwrap();

    let result = repo.create(identity("alice2", "alice@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_save_changes_email() {
    let repo = MockIdentityRepository::new();
    let mut alice = repo.create(identity("alice", "alice@example.com")).await.unwrap();

    alice.change_email("alice.w@example.com".to_string());
    repo.save(alice.clone()).await.unwrap();

    assert!(repo.find_by_email("alice@example.com").await.unwrap().is_none());
    let found = repo.find_by_email("alice.w@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, alice.id);
}

#[tokio::test]
async fn test_save_conflicting_email() {
    let repo = MockIdentityRepository::new();
    repo.create(identity("alice", "alice@example.com")).await.unwrap();
    let mut bob = repo.create(identity("bob", "bob@example.com")).await.unwrap();

    bob.change_email("alice@example.com".to_string());
    let result = repo.save(bob).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
}

#[tokio::test]
async fn test_save_unknown_identity() {
    let repo = MockIdentityRepository::new();
    let result = repo.save(identity("ghost", "ghost@example.com")).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
