//! Unit tests for mock revocation ledger implementation

use chrono::{Duration, Utc};

use crate::domain::entities::RevocationEntry;
use crate::repositories::revocation::{MockRevocationRepository, RevocationRepository};

#[tokio::test]
async fn test_append_and_lookup_exact_match() {
    let repo = MockRevocationRepository::new();
    repo.append(RevocationEntry::new("abc.def.ghi", None)).await.unwrap();

    assert!(repo.is_revoked("abc.def.ghi").await.unwrap());
    assert!(!repo.is_revoked("abc.def.gh").await.unwrap());
    assert!(!repo.is_revoked("abc.def.ghij").await.unwrap());
}

#[tokio::test]
async fn test_append_twice_is_harmless() {
    let repo = MockRevocationRepository::new();
    repo.append(RevocationEntry::new("tok", None)).await.unwrap();
    repo.append(RevocationEntry::new("tok", None)).await.unwrap();

    assert!(repo.is_revoked("tok").await.unwrap());
}

#[tokio::test]
async fn test_purge_expired_keeps_live_entries() {
    let repo = MockRevocationRepository::new();
    let now = Utc::now();
    repo.append(RevocationEntry::new("old", Some(now - Duration::hours(1))))
        .await
        .unwrap();
    repo.append(RevocationEntry::new("live", Some(now + Duration::hours(1))))
        .await
        .unwrap();
    repo.append(RevocationEntry::new("unknown", None)).await.unwrap();

    let purged = repo.purge_expired(now).await.unwrap();

    assert_eq!(purged, 1);
    assert!(!repo.is_revoked("old").await.unwrap());
    assert!(repo.is_revoked("live").await.unwrap());
    assert!(repo.is_revoked("unknown").await.unwrap());
}

#[tokio::test]
async fn test_store_failure() {
    let repo = MockRevocationRepository::new();
    repo.fail_with_store_error(true);

    assert!(repo.is_revoked("tok").await.is_err());
    assert!(repo.append(RevocationEntry::new("tok", None)).await.is_err());

    repo.fail_with_store_error(false);
    assert!(!repo.is_revoked("tok").await.unwrap());
}
