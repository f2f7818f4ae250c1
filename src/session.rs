use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, fmt, sync::Arc};
use tokio::sync::RwLock;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    auth,
    config::AppConfig,
    models::{LoginRequest, User},
    repository::Repository,
};

/// Key the logged-in session is stored under.
pub const USER_STORE_KEY: &str = "user-store";

// 1. SessionStore Contract
/// SessionStore
///
/// A small key/value store for JSON documents. The in-memory implementation is
/// used at runtime; tests can substitute their own.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<Value>;

    async fn set(&self, key: &str, value: Value);

    /// Returns whether a value was present.
    async fn remove(&self, key: &str) -> bool;

    /// Removes the value only if it still equals `expected`.
    async fn remove_if_eq(&self, key: &str, expected: &Value) -> bool;
}

// 2. In-memory implementation
/// MemorySessionStore
///
/// Lives as long as the process. Nothing is written to disk.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: Value) {
        self.entries.write().await.insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    async fn remove_if_eq(&self, key: &str, expected: &Value) -> bool {
        let mut entries = self.entries.write().await;
        if entries.get(key) != Some(expected) {
            return false;
        }
        entries.remove(key).is_some()
    }
}

/// SessionState
///
/// The concrete type used to share the session store across the application state.
pub type SessionState = Arc<dyn SessionStore>;

/// Session
///
/// The document kept under `user-store`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Session {
    pub user: User,
    pub token: String,
    #[ts(type = "string")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum LoginError {
    /// Email or password was blank.
    MissingCredentials,
    UnknownUser,
    Token(jsonwebtoken::errors::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::MissingCredentials => f.write_str("email and password are required"),
            LoginError::UnknownUser => f.write_str("no account with that email"),
            LoginError::Token(e) => write!(f, "failed to sign session token: {e}"),
            LoginError::Serialization(e) => write!(f, "failed to store session: {e}"),
        }
    }
}

impl std::error::Error for LoginError {}

/// login
///
/// Demo login: any fixture account with a non-empty password. Issues a session
/// token and stores the session under `user-store`, replacing any previous one.
pub async fn login(
    repo: &dyn Repository,
    store: &dyn SessionStore,
    config: &AppConfig,
    req: LoginRequest,
    now: DateTime<Utc>,
) -> Result<Session, LoginError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }

    let user = repo
        .find_user_by_email(email)
        .await
        .ok_or(LoginError::UnknownUser)?;

    let (token, expires_at) = auth::issue_token(&user, config, now).map_err(LoginError::Token)?;
    let session = Session {
        user,
        token,
        expires_at,
    };

    let value = serde_json::to_value(&session).map_err(LoginError::Serialization)?;
    store.set(USER_STORE_KEY, value).await;

    tracing::info!(user_id = %session.user.id, role = %session.user.role, "user logged in");
    Ok(session)
}

/// logout
///
/// Clears the stored session if it belongs to `user_id`. Returns whether one
/// was removed; another user's session is left alone.
pub async fn logout(store: &dyn SessionStore, user_id: &str) -> bool {
    let Some(value) = store.get(USER_STORE_KEY).await else {
        return false;
    };
    if owner(&value) != Some(user_id) {
        return false;
    }

    // A login that replaced the document in the meantime keeps its session.
    let removed = store.remove_if_eq(USER_STORE_KEY, &value).await;
    if removed {
        tracing::info!(user_id, "user logged out");
    }
    removed
}

/// current_session
///
/// The stored session, but only for the user it belongs to. A stored document
/// that no longer deserializes is treated as no session.
pub async fn current_session(store: &dyn SessionStore, user_id: &str) -> Option<Session> {
    let value = store.get(USER_STORE_KEY).await?;
    match serde_json::from_value::<Session>(value) {
        Ok(session) if session.user.id == user_id => Some(session),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable session document");
            None
        }
    }
}

fn owner(value: &Value) -> Option<&str> {
    value.get("user")?.get("id")?.as_str()
}
