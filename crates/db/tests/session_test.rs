//! Integration tests for Session repository.

mod common;

use chrono::{Duration, Utc};
use common::{register, setup_db};
use finboard_db::SessionRepository;
use finboard_db::repositories::NewSession;

#[tokio::test]
async fn test_session_create() {
    let db = setup_db().await;
    let registered = register(&db, "Acme", "alice").await;
    let repo = SessionRepository::new(db.clone());
    let expires_at = Utc::now() + Duration::days(7);

    let session = repo
        .create(NewSession {
            user_id: registered.manager.id,
            company_id: registered.company.id,
            refresh_token: "test_refresh_token",
            expires_at,
            user_agent: Some("Test Agent"),
            ip_address: Some("127.0.0.1"),
        })
        .await
        .expect("Failed to create session");

    assert_eq!(session.user_id, registered.manager.id);
    assert_eq!(session.company_id, registered.company.id);
    assert_eq!(session.user_agent.as_deref(), Some("Test Agent"));
    assert_eq!(session.ip_address.as_deref(), Some("127.0.0.1"));
    assert_eq!(
        session.refresh_token_hash,
        SessionRepository::hash_token("test_refresh_token")
    );
    assert!(session.revoked_at.is_none());
}

#[tokio::test]
async fn test_session_find_by_token() {
    let db = setup_db().await;
    let registered = register(&db, "Acme", "alice").await;
    let repo = SessionRepository::new(db.clone());

    let session = repo
        .create(NewSession {
            user_id: registered.manager.id,
            company_id: registered.company.id,
            refresh_token: "find_me",
            expires_at: Utc::now() + Duration::days(7),
            user_agent: None,
            ip_address: None,
        })
        .await
        .expect("Failed to create session");

    let found = repo
        .find_by_token("find_me")
        .await
        .expect("Query should succeed")
        .expect("Session should exist");
    assert_eq!(found.id, session.id);

    let missing = repo
        .find_by_token("nonexistent_token")
        .await
        .expect("Query should succeed");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_session_revoke_by_token() {
    let db = setup_db().await;
    let registered = register(&db, "Acme", "alice").await;
    let repo = SessionRepository::new(db.clone());

    repo.create(NewSession {
        user_id: registered.manager.id,
        company_id: registered.company.id,
        refresh_token: "revoke_me",
        expires_at: Utc::now() + Duration::days(7),
        user_agent: None,
        ip_address: None,
    })
    .await
    .expect("Failed to create session");

    assert!(repo.revoke_by_token("revoke_me").await.expect("revoke"));
    assert!(
        repo.find_by_token("revoke_me")
            .await
            .expect("Query should succeed")
            .is_none()
    );
    // Second revoke finds nothing live
    assert!(!repo.revoke_by_token("revoke_me").await.expect("revoke"));
}

#[tokio::test]
async fn test_expired_session_is_not_found() {
    let db = setup_db().await;
    let registered = register(&db, "Acme", "alice").await;
    let repo = SessionRepository::new(db.clone());

    repo.create(NewSession {
        user_id: registered.manager.id,
        company_id: registered.company.id,
        refresh_token: "stale",
        expires_at: Utc::now() - Duration::minutes(1),
        user_agent: None,
        ip_address: None,
    })
    .await
    .expect("Failed to create session");

    assert!(
        repo.find_by_token("stale")
            .await
            .expect("Query should succeed")
            .is_none()
    );
}

#[test]
fn test_hash_token_is_sha256_hex() {
    let hash = SessionRepository::hash_token("abc");
    assert_eq!(
        hash,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}
