use chrono::{TimeDelta, TimeZone, Utc};
use isp_console::{
    InMemoryRepository, MemorySessionStore,
    auth::decode_token,
    config::AppConfig,
    models::LoginRequest,
    session::{self, LoginError, SessionStore, USER_STORE_KEY},
};

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_memory_store_roundtrip() {
    let store = MemorySessionStore::new();
    assert!(store.get("theme").await.is_none());

    store.set("theme", serde_json::json!({ "dark": true })).await;
    assert_eq!(store.get("theme").await, Some(serde_json::json!({ "dark": true })));

    assert!(store.remove("theme").await);
    assert!(!store.remove("theme").await);
}

#[tokio::test]
async fn test_login_stores_session_under_user_store() {
    let repo = InMemoryRepository::seeded();
    let store = MemorySessionStore::new();
    let config = AppConfig::default();
    let now = Utc::now();

    let session = session::login(
        &repo,
        &store,
        &config,
        login_request("  Support@Metro-Fiber.com ", "pw"),
        now,
    )
    .await
    .unwrap();

    assert_eq!(session.user.id, "user-3");
    assert_eq!(session.expires_at, now + TimeDelta::seconds(3600));
    assert!(store.get(USER_STORE_KEY).await.is_some());

    let claims = decode_token(&session.token, &config).unwrap();
    assert_eq!(claims.sub, "user-3");
    assert_eq!(claims.role, "customer_support");

    assert_eq!(session::current_session(&store, "user-3").await, Some(session));
}

#[tokio::test]
async fn test_login_replaces_previous_session() {
    let repo = InMemoryRepository::seeded();
    let store = MemorySessionStore::new();
    let config = AppConfig::default();

    session::login(&repo, &store, &config, login_request("it@metro-fiber.com", "pw"), Utc::now())
        .await
        .unwrap();
    session::login(&repo, &store, &config, login_request("admin@example.com", "pw"), Utc::now())
        .await
        .unwrap();

    let current = session::current_session(&store, "user-1").await.unwrap();
    assert_eq!(current.user.id, "user-1");
    assert!(session::current_session(&store, "user-2").await.is_none());
}

#[tokio::test]
async fn test_login_errors() {
    let repo = InMemoryRepository::seeded();
    let store = MemorySessionStore::new();
    let config = AppConfig::default();
    let now = Utc.with_ymd_and_hms(2025, 10, 16, 12, 0, 0).unwrap();

    let blank = session::login(&repo, &store, &config, login_request(" ", "pw"), now).await;
    assert!(matches!(blank, Err(LoginError::MissingCredentials)));

    let no_password =
        session::login(&repo, &store, &config, login_request("it@metro-fiber.com", ""), now).await;
    assert!(matches!(no_password, Err(LoginError::MissingCredentials)));

    let unknown =
        session::login(&repo, &store, &config, login_request("who@example.com", "pw"), now).await;
    assert!(matches!(unknown, Err(LoginError::UnknownUser)));

    assert!(session::current_session(&store, "user-2").await.is_none());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let repo = InMemoryRepository::seeded();
    let store = MemorySessionStore::new();
    let config = AppConfig::default();

    assert!(!session::logout(&store, "user-5").await);

    session::login(&repo, &store, &config, login_request("it@metro-fiber.com", "pw"), Utc::now())
        .await
        .unwrap();
    assert!(session::logout(&store, "user-5").await);
    assert!(session::current_session(&store, "user-5").await.is_none());
    assert!(store.get(USER_STORE_KEY).await.is_none());
}

#[tokio::test]
async fn test_session_is_private_to_its_user() {
    let repo = InMemoryRepository::seeded();
    let store = MemorySessionStore::new();
    let config = AppConfig::default();

    session::login(&repo, &store, &config, login_request("admin@example.com", "pw"), Utc::now())
        .await
        .unwrap();

    // Another account can neither read nor clear it.
    assert!(session::current_session(&store, "user-3").await.is_none());
    assert!(!session::logout(&store, "user-3").await);

    let current = session::current_session(&store, "user-1").await.unwrap();
    assert_eq!(current.user.id, "user-1");
}

#[tokio::test]
async fn test_remove_if_eq_keeps_replaced_value() {
    let store = MemorySessionStore::new();
    let first = serde_json::json!({ "user": { "id": "user-1" } });
    let second = serde_json::json!({ "user": { "id": "user-2" } });

    store.set(USER_STORE_KEY, second.clone()).await;
    assert!(!store.remove_if_eq(USER_STORE_KEY, &first).await);
    assert_eq!(store.get(USER_STORE_KEY).await, Some(second.clone()));

    assert!(store.remove_if_eq(USER_STORE_KEY, &second).await);
    assert!(store.get(USER_STORE_KEY).await.is_none());
}

#[tokio::test]
async fn test_unreadable_session_document_is_ignored() {
    let store = MemorySessionStore::new();
    store
        .set(USER_STORE_KEY, serde_json::json!({ "user": "not a user" }))
        .await;

    assert!(session::current_session(&store, "user-1").await.is_none());
}
