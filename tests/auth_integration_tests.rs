use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, Method, Request, StatusCode, Uri, header, request::Parts},
};
use chrono::{TimeDelta, Utc};
use isp_console::{
    AppState, InMemoryRepository, MemorySessionStore,
    auth::{Claims, ROLE_HEADER, Viewer, decode_token, issue_token},
    config::{AppConfig, Env},
    fixtures,
    models::User,
    roles::Role,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::sync::Arc;
use uuid::Uuid;

// --- Constants ---

const TEST_JWT_SECRET: &str = "test-only-console-secret";

// --- Helpers ---

fn create_app_state(env: Env) -> AppState {
    let config = AppConfig {
        env,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        default_role: Role::CustomerSupport,
        ..AppConfig::default()
    };

    AppState {
        repo: Arc::new(InMemoryRepository::seeded()),
        sessions: Arc::new(MemorySessionStore::new()),
        config,
    }
}

/// Helper to get the mutable Parts struct from a generated Request
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn fixture_user(id: &str) -> User {
    fixtures::users()
        .into_iter()
        .find(|user| user.id == id)
        .unwrap()
}

fn with_bearer(parts: &mut Parts, token: &str) {
    parts.headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
}

// --- Token round trip ---

#[test]
fn test_issued_token_carries_user_and_role() {
    let state = create_app_state(Env::Production);
    let now = Utc::now();

    let (token, expires_at) = issue_token(&fixture_user("user-4"), &state.config, now).unwrap();
    assert_eq!(expires_at, now + TimeDelta::seconds(3600));

    let claims = decode_token(&token, &state.config).unwrap();
    assert_eq!(claims.sub, "user-4");
    assert_eq!(claims.role, "billing_officer");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let state = create_app_state(Env::Production);
    let other = AppConfig {
        jwt_secret: "some-other-secret".to_string(),
        ..state.config.clone()
    };

    let (token, _) = issue_token(&fixture_user("user-4"), &other, Utc::now()).unwrap();
    assert!(decode_token(&token, &state.config).is_err());
}

// --- Viewer extraction ---

#[tokio::test]
async fn test_role_header_wins_locally() {
    let app_state = create_app_state(Env::Local);

    let mut parts = get_request_parts(Method::GET, "/navigation".parse().unwrap());
    parts
        .headers
        .insert(ROLE_HEADER, HeaderValue::from_static("billing_officer"));

    let viewer = Viewer::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();
    assert_eq!(viewer.role(), Some(Role::BillingOfficer));
    assert!(viewer.user_id.is_none());
}

#[tokio::test]
async fn test_unknown_role_header_is_kept_raw() {
    let app_state = create_app_state(Env::Local);

    let mut parts = get_request_parts(Method::GET, "/navigation".parse().unwrap());
    parts
        .headers
        .insert(ROLE_HEADER, HeaderValue::from_static("janitor"));

    let viewer = Viewer::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();
    assert_eq!(viewer.role, "janitor");
    assert!(viewer.role().is_none());
}

#[tokio::test]
async fn test_local_default_role_without_headers() {
    let app_state = create_app_state(Env::Local);

    let mut parts = get_request_parts(Method::GET, "/dashboard".parse().unwrap());

    let viewer = Viewer::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();
    assert_eq!(viewer.role(), Some(Role::CustomerSupport));
}

#[tokio::test]
async fn test_auth_success_with_valid_jwt() {
    let app_state = create_app_state(Env::Production);
    let (token, _) = issue_token(&fixture_user("user-7"), &app_state.config, Utc::now()).unwrap();

    let mut parts = get_request_parts(Method::GET, "/tickets".parse().unwrap());
    with_bearer(&mut parts, &token);

    let viewer = Viewer::from_request_parts(&mut parts, &app_state).await;

    assert!(viewer.is_ok());
    let viewer = viewer.unwrap();
    assert_eq!(viewer.user_id.as_deref(), Some("user-7"));
    assert_eq!(viewer.role(), Some(Role::Customer));
}

#[tokio::test]
async fn test_auth_failure_with_missing_header() {
    let app_state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());

    let viewer = Viewer::from_request_parts(&mut parts, &app_state).await;

    assert!(viewer.is_err());
    assert_eq!(viewer.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_header_ignored_in_prod() {
    let app_state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    // Provide ONLY the role switcher header
    parts
        .headers
        .insert(ROLE_HEADER, HeaderValue::from_static("super_admin"));

    let viewer = Viewer::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(viewer.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_bad_signature() {
    let app_state = create_app_state(Env::Production);
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "user-1".to_string(),
        role: "super_admin".to_string(),
        iat: now,
        exp: now + 3600,
        jti: Uuid::new_v4(),
    };
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"not-the-server-secret"),
    )
    .unwrap();

    let mut parts = get_request_parts(Method::GET, "/tenants".parse().unwrap());
    with_bearer(&mut parts, &forged);

    let viewer = Viewer::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(viewer.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_expired_jwt() {
    let app_state = create_app_state(Env::Production);
    let issued = Utc::now() - TimeDelta::hours(3);
    let (token, _) = issue_token(&fixture_user("user-2"), &app_state.config, issued).unwrap();

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let viewer = Viewer::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(viewer.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_when_user_no_longer_exists() {
    let app_state = create_app_state(Env::Production);
    let ghost = User {
        id: "user-99".to_string(),
        email: "ghost@metro-fiber.com".to_string(),
        name: "Ghost".to_string(),
        role: Role::SystemAdmin,
        tenant_id: None,
    };
    let (token, _) = issue_token(&ghost, &app_state.config, Utc::now()).unwrap();

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let viewer = Viewer::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(viewer.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_token_used_locally_without_role_header() {
    let app_state = create_app_state(Env::Local);
    let (token, _) = issue_token(&fixture_user("user-1"), &app_state.config, Utc::now()).unwrap();

    let mut parts = get_request_parts(Method::GET, "/tenants".parse().unwrap());
    with_bearer(&mut parts, &token);

    let viewer = Viewer::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();
    assert_eq!(viewer.role(), Some(Role::SuperAdmin));
    assert_eq!(viewer.user_id.as_deref(), Some("user-1"));
}

#[tokio::test]
async fn test_viewer_already_in_extensions_is_reused() {
    let app_state = create_app_state(Env::Production);

    // No token at all: only the cached viewer can satisfy production auth.
    let mut parts = get_request_parts(Method::GET, "/tickets".parse().unwrap());
    parts.extensions.insert(Viewer {
        user_id: Some("user-3".to_string()),
        role: "customer_support".to_string(),
    });

    let viewer = Viewer::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();
    assert_eq!(viewer.user_id.as_deref(), Some("user-3"));
    assert_eq!(viewer.role(), Some(Role::CustomerSupport));
}
