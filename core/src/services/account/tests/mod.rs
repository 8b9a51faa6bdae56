//! Unit tests for the account service

use std::sync::Arc;

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::{IdentityRepository, MockIdentityRepository, MockRevocationRepository};
use crate::services::account::{AccountService, AccountServiceConfig, ProfileChanges};
use crate::services::token::{TokenService, TokenServiceConfig};

const PASSWORD: &str = "Passw0rd";

struct Fixture {
    service: AccountService<MockIdentityRepository, MockRevocationRepository>,
    identities: Arc<MockIdentityRepository>,
    tokens: Arc<TokenService<MockRevocationRepository>>,
    ledger: Arc<MockRevocationRepository>,
}

fn create_fixture() -> Fixture {
    let identities = Arc::new(MockIdentityRepository::new());
    let ledger = Arc::new(MockRevocationRepository::new());
    let tokens = Arc::new(
        TokenService::new(ledger.clone(), TokenServiceConfig::new("test-secret", "account-service")).unwrap(),
    );
    let service = AccountService::new(
        identities.clone(),
        tokens.clone(),
        AccountServiceConfig { bcrypt_cost: 4 },
    );

    Fixture {
        service,
        identities,
        tokens,
        ledger,
    }
}

async fn registered_fixture() -> Fixture {
    let fixture = create_fixture();
    fixture
        .service
        .register("alice", "alice@example.com", PASSWORD, PASSWORD)
        .await
        .unwrap();
    fixture
}

#[tokio::test]
async fn test_register_stores_hashed_password() {
    let fixture = create_fixture();

    let identity = fixture
        .service
        .register("alice", "alice@example.com", PASSWORD, PASSWORD)
        .await
        .unwrap();

    assert_eq!(identity.name, "alice");
    assert_eq!(identity.email, "alice@example.com");
    assert_ne!(identity.password_hash, PASSWORD);
    assert!(fixture.identities.exists("alice@example.com").await.unwrap());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let fixture = registered_fixture().await;

    let result = fixture
        .service
        .register("alice2", "alice@example.com", PASSWORD, PASSWORD)
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
}

#[tokio::test]
async fn test_register_validation() {
    let fixture = create_fixture();

    let cases = [
        ("alice", "not-an-email", PASSWORD, PASSWORD, ValidationError::InvalidEmail),
        ("alice", "alice@example.com", "short1A", "short1A", ValidationError::InvalidPassword),
        ("alice", "alice@example.com", "alllowercase1", "alllowercase1", ValidationError::InvalidPassword),
        ("alice", "alice@example.com", PASSWORD, "Passw0rd!", ValidationError::PasswordMismatch),
        ("al", "alice@example.com", PASSWORD, PASSWORD, ValidationError::InvalidName),
        (
            "",
            "alice@example.com",
            PASSWORD,
            PASSWORD,
            ValidationError::RequiredField {
                field: "name".to_string(),
            },
        ),
    ];

    for (name, email, password, confirm, expected) in cases {
        let result = fixture.service.register(name, email, password, confirm).await;
        match result {
            Err(DomainError::ValidationErr(err)) => assert_eq!(err, expected),
            other => panic!("expected {:?}, got {:?}", expected, other),
        }
    }

    assert_eq!(fixture.identities.len().await, 0);
}

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let fixture = registered_fixture().await;

    let issued = fixture
        .service
        .login("alice@example.com", PASSWORD)
        .await
        .unwrap();

    let verified = fixture.tokens.verify(&issued.token).await.unwrap();
    assert_eq!(verified.email(), "alice@example.com");
}

#[tokio::test]
async fn test_login_does_not_reveal_unknown_email() {
    let fixture = registered_fixture().await;

    let unknown = fixture.service.login("bob@example.com", PASSWORD).await;
    let wrong = fixture.service.login("alice@example.com", "Passw0rdX").await;

    assert!(matches!(
        unknown,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        wrong,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_login_rejects_bad_shapes() {
    let fixture = registered_fixture().await;

    assert!(matches!(
        fixture.service.login("alice", PASSWORD).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
    assert!(matches!(
        fixture.service.login("alice@example.com", "").await,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));
}

#[tokio::test]
async fn test_profile() {
    let fixture = registered_fixture().await;

    let identity = fixture.service.profile("alice@example.com").await.unwrap();
    assert_eq!(identity.name, "alice");

    assert!(matches!(
        fixture.service.profile("ghost@example.com").await,
        Err(DomainError::Auth(AuthError::IdentityNotFound))
    ));
}

#[tokio::test]
async fn test_update_name_keeps_token() {
    let fixture = registered_fixture().await;
    let issued = fixture.service.login("alice@example.com", PASSWORD).await.unwrap();

    let update = fixture
        .service
        .update_profile(
            "alice@example.com",
            ProfileChanges {
                name: Some("alice.w".to_string()),
                email: Some("  ".to_string()),
            },
            &issued.token,
        )
        .await
        .unwrap();

    assert_eq!(update.identity.name, "alice.w");
    assert!(update.token.is_none());
    assert!(fixture.tokens.verify(&issued.token).await.is_ok());
}

#[tokio::test]
async fn test_update_email_rotates_token() {
    let fixture = registered_fixture().await;
    let issued = fixture.service.login("alice@example.com", PASSWORD).await.unwrap();

    let update = fixture
        .service
        .update_profile(
            "alice@example.com",
            ProfileChanges {
                name: None,
                email: Some("alice.w@example.com".to_string()),
            },
            &issued.token,
        )
        .await
        .unwrap();

    let new_token = update.token.expect("new token for the new email");
    assert_eq!(new_token.email(), "alice.w@example.com");
    assert!(update.previous_token_revoked);
    assert_eq!(
        fixture.tokens.verify(&issued.token).await,
        Err(TokenError::Revoked)
    );
    assert!(fixture.tokens.verify(&new_token.token).await.is_ok());
    assert!(fixture
        .identities
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .is_none());

    // Old password still works under the new email
    assert!(fixture
        .service
        .login("alice.w@example.com", PASSWORD)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_update_email_survives_ledger_failure() {
    let fixture = registered_fixture().await;
    let issued = fixture.service.login("alice@example.com", PASSWORD).await.unwrap();
    fixture.ledger.fail_with_store_error(true);

    let update = fixture
        .service
        .update_profile(
            "alice@example.com",
            ProfileChanges {
                name: None,
                email: Some("alice.w@example.com".to_string()),
            },
            &issued.token,
        )
        .await
        .unwrap();

    // The email change is committed and the caller still gets a usable credential
    assert_eq!(update.identity.email, "alice.w@example.com");
    let new_token = update.token.expect("new token for the new email");
    assert_eq!(new_token.email(), "alice.w@example.com");
    assert!(!update.previous_token_revoked);
    assert_eq!(fixture.ledger.len().await, 0);

    assert!(fixture
        .identities
        .find_by_email("alice.w@example.com")
        .await
        .unwrap()
        .is_some());
    assert!(fixture
        .identities
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .is_none());

    fixture.ledger.fail_with_store_error(false);
    assert!(fixture.tokens.verify(&new_token.token).await.is_ok());
}

#[tokio::test]
async fn test_update_email_to_taken_email() {
    let fixture = registered_fixture().await;
    fixture
        .service
        .register("bob", "bob@example.com", PASSWORD, PASSWORD)
        .await
        .unwrap();
    let issued = fixture.service.login("alice@example.com", PASSWORD).await.unwrap();

    let result = fixture
        .service
        .update_profile(
            "alice@example.com",
            ProfileChanges {
                name: None,
                email: Some("bob@example.com".to_string()),
            },
            &issued.token,
        )
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
    assert!(fixture.tokens.verify(&issued.token).await.is_ok());
}

#[tokio::test]
async fn test_update_with_invalid_values() {
    let fixture = registered_fixture().await;

    let bad_name = fixture
        .service
        .update_profile(
            "alice@example.com",
            ProfileChanges {
                name: Some("a b".to_string()),
                email: None,
            },
            "tok",
        )
        .await;
    assert!(matches!(
        bad_name,
        Err(DomainError::ValidationErr(ValidationError::InvalidName))
    ));

    let bad_email = fixture
        .service
        .update_profile(
            "alice@example.com",
            ProfileChanges {
                name: None,
                email: Some("nope".to_string()),
            },
            "tok",
        )
        .await;
    assert!(matches!(
        bad_email,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
}

#[tokio::test]
async fn test_update_with_no_changes() {
    let fixture = registered_fixture().await;

    let update = fixture
        .service
        .update_profile(
            "alice@example.com",
            ProfileChanges {
                name: None,
                email: Some("alice@example.com".to_string()),
            },
            "tok",
        )
        .await
        .unwrap();

    assert_eq!(update.identity.name, "alice");
    assert!(update.token.is_none());
}

#[tokio::test]
async fn test_change_password() {
    let fixture = registered_fixture().await;

    fixture
        .service
        .change_password("alice@example.com", PASSWORD, "NewPassw0rd")
        .await
        .unwrap();

    assert!(fixture
        .service
        .login("alice@example.com", "NewPassw0rd")
        .await
        .is_ok());
    assert!(matches!(
        fixture.service.login("alice@example.com", PASSWORD).await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_change_password_wrong_old() {
    let fixture = registered_fixture().await;

    let result = fixture
        .service
        .change_password("alice@example.com", "Wr0ngPassword", "NewPassw0rd")
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::WrongPassword))
    ));
}

#[tokio::test]
async fn test_change_password_invalid_new() {
    let fixture = registered_fixture().await;

    let result = fixture
        .service
        .change_password("alice@example.com", PASSWORD, "weak")
        .await;

    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidPassword))
    ));
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let fixture = registered_fixture().await;
    let issued = fixture.service.login("alice@example.com", PASSWORD).await.unwrap();

    fixture.service.logout(&issued.token).await.unwrap();

    assert_eq!(
        fixture.tokens.verify(&issued.token).await,
        Err(TokenError::Revoked)
    );
}
