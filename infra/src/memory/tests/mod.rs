//! Unit tests for the in-memory stores

use std::sync::Arc;

use chrono::{Duration, Utc};

use acct_core::domain::entities::{Identity, RevocationEntry};
use acct_core::errors::{AuthError, DomainError};
use acct_core::repositories::{IdentityRepository, RevocationRepository};

use crate::memory::{InMemoryIdentityRepository, InMemoryRevocationRepository};

fn identity(name: &str, email: &str) -> Identity {
    Identity::new(name.to_string(), email.to_string(), "hash".to_string())
}

#[tokio::test]
async fn test_identity_create_and_find() {
    let repo = InMemoryIdentityRepository::new();
    let created = repo.create(identity("alice", "alice@example.com")).await.unwrap();

    assert_eq!(
        repo.find_by_email("alice@example.com").await.unwrap(),
        Some(created)
    );
    assert!(repo.find_by_email("ALICE@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_identity_email_is_unique() {
    let repo = InMemoryIdentityRepository::new();
    repo.create(identity("alice", "alice@example.com")).await.unwrap();
    let mut bob = repo.create(identity("bob", "bob@example.com")).await.unwrap();

    assert!(matches!(
        repo.create(identity("eve", "alice@example.com")).await,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));

    bob.change_email("alice@example.com".to_string());
    assert!(matches!(
        repo.save(bob).await,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
}

#[tokio::test]
async fn test_identity_save_unknown() {
    let repo = InMemoryIdentityRepository::new();

    assert!(matches!(
        repo.save(identity("ghost", "ghost@example.com")).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    let repo = Arc::new(InMemoryIdentityRepository::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.create(identity(&format!("user{}", i), "same@example.com"))
                    .await
                    .is_ok()
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_revocation_exact_match_and_idempotence() {
    let repo = InMemoryRevocationRepository::new();
    repo.append(RevocationEntry::new("a.b.c", None)).await.unwrap();
    repo.append(RevocationEntry::new("a.b.c", None)).await.unwrap();

    assert!(repo.is_revoked("a.b.c").await.unwrap());
    assert!(!repo.is_revoked("a.b.c ").await.unwrap());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_revocation_purge() {
    let repo = InMemoryRevocationRepository::new();
    let now = Utc::now();
    repo.append(RevocationEntry::new("old", Some(now - Duration::seconds(1))))
        .await
        .unwrap();
    repo.append(RevocationEntry::new("live", Some(now + Duration::hours(1))))
        .await
        .unwrap();
    repo.append(RevocationEntry::new("opaque", None)).await.unwrap();

    assert_eq!(repo.purge_expired(now).await.unwrap(), 1);
    assert!(!repo.is_revoked("old").await.unwrap());
    assert!(repo.is_revoked("live").await.unwrap());
    assert!(repo.is_revoked("opaque").await.unwrap());
}

#[tokio::test]
async fn test_revoke_visible_across_tasks() {
    let repo = Arc::new(InMemoryRevocationRepository::new());

    let writer = repo.clone();
    tokio::spawn(async move {
        writer
            .append(RevocationEntry::new("shared", None))
            .await
            .unwrap();
    })
    .await
    .unwrap();

    assert!(repo.is_revoked("shared").await.unwrap());
}
