//! Integration tests for Session repository.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use tally_core::auth::UserRole;
use tally_db::{SessionRepository, UserRepository, connect_in_memory};
use uuid::Uuid;

async fn create_test_user(db: &DatabaseConnection) -> Uuid {
    UserRepository::new(db.clone())
        .create(
            "Session Test User",
            &format!("session-test-{}@example.com", Uuid::new_v4()),
            "$argon2id$test",
            UserRole::User,
        )
        .await
        .expect("Failed to create test user")
        .id
}

#[tokio::test]
async fn test_session_create() {
    let db = connect_in_memory().await.unwrap();
    let user_id = create_test_user(&db).await;
    let repo = SessionRepository::new(db.clone());
    let id = Uuid::new_v4();

    let session = repo
        .create(
            id,
            user_id,
            "auth",
            "raw-token",
            Utc::now() + Duration::days(7),
            Some("Test Agent"),
        )
        .await
        .expect("Failed to create session");

    assert_eq!(session.id, id);
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.name, "auth");
    assert_eq!(session.token_hash, SessionRepository::hash_token("raw-token"));
    assert_ne!(session.token_hash, "raw-token");
    assert_eq!(session.user_agent.as_deref(), Some("Test Agent"));
    assert!(session.revoked_at.is_none());
}

#[tokio::test]
async fn test_find_active_requires_matching_token() {
    let db = connect_in_memory().await.unwrap();
    let user_id = create_test_user(&db).await;
    let repo = SessionRepository::new(db.clone());
    let id = Uuid::new_v4();

    repo.create(id, user_id, "auth", "right", Utc::now() + Duration::hours(1), None)
        .await
        .unwrap();

    assert!(repo.find_active(id, "right").await.unwrap().is_some());
    assert!(repo.find_active(id, "wrong").await.unwrap().is_none());
    assert!(repo.find_active(Uuid::new_v4(), "right").await.unwrap().is_none());
}

#[tokio::test]
async fn test_expired_session_is_not_active() {
    let db = connect_in_memory().await.unwrap();
    let user_id = create_test_user(&db).await;
    let repo = SessionRepository::new(db.clone());
    let id = Uuid::new_v4();

    repo.create(id, user_id, "auth", "old", Utc::now() - Duration::hours(1), None)
        .await
        .unwrap();

    assert!(repo.find_active(id, "old").await.unwrap().is_none());
    assert_eq!(repo.delete_expired().await.unwrap(), 1);
}

#[tokio::test]
async fn test_revoke_only_targets_one_session() {
    let db = connect_in_memory().await.unwrap();
    let user_id = create_test_user(&db).await;
    let repo = SessionRepository::new(db.clone());
    let expires_at = Utc::now() + Duration::hours(1);
    let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

    repo.create(first, user_id, "auth", "t1", expires_at, None)
        .await
        .unwrap();
    repo.create(second, user_id, "auth", "t2", expires_at, None)
        .await
        .unwrap();

    assert!(repo.revoke(first).await.unwrap());
    assert!(!repo.revoke(first).await.unwrap());

    assert!(repo.find_active(first, "t1").await.unwrap().is_none());
    assert!(repo.find_active(second, "t2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_revoke_all_for_user() {
    let db = connect_in_memory().await.unwrap();
    let user_id = create_test_user(&db).await;
    let other_id = create_test_user(&db).await;
    let repo = SessionRepository::new(db.clone());
    let expires_at = Utc::now() + Duration::hours(1);
    let other_session = Uuid::new_v4();

    let mut own = Vec::new();
    for token in ["a", "b", "c"] {
        let id = Uuid::new_v4();
        repo.create(id, user_id, "auth", token, expires_at, None)
            .await
            .unwrap();
        own.push(id);
    }
    repo.create(other_session, other_id, "google", "d", expires_at, None)
        .await
        .unwrap();

    assert_eq!(repo.revoke_all_for_user(user_id, Some(own[0])).await.unwrap(), 2);
    assert!(repo.find_active(own[0], "a").await.unwrap().is_some());
    assert!(repo.find_active(own[1], "b").await.unwrap().is_none());

    assert_eq!(repo.revoke_all_for_user(user_id, None).await.unwrap(), 1);
    assert!(repo.find_active(own[0], "a").await.unwrap().is_none());
    assert!(repo.find_active(other_session, "d").await.unwrap().is_some());
}

#[tokio::test]
async fn test_touch_sets_last_used() {
    let db = connect_in_memory().await.unwrap();
    let user_id = create_test_user(&db).await;
    let repo = SessionRepository::new(db.clone());
    let id = Uuid::new_v4();

    repo.create(id, user_id, "auth", "t", Utc::now() + Duration::hours(1), None)
        .await
        .unwrap();
    repo.touch(id).await.unwrap();

    let session = repo.find_active(id, "t").await.unwrap().unwrap();
    assert!(session.last_used_at.is_some());
}
