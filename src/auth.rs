use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    models::User,
    repository::RepositoryState,
    roles::Role,
};

/// Header carrying the role picked in the role switcher (local runs only).
pub const ROLE_HEADER: &str = "x-role";

/// Claims
///
/// Payload of the console session token, signed with HS256.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): id of the fixture user the session belongs to.
    pub sub: String,
    /// Role tag of the user at login time.
    pub role: String,
    /// Issued At (iat).
    pub iat: usize,
    /// Expiration Time (exp).
    pub exp: usize,
    /// Unique token id, so two logins in the same second never share a token.
    pub jti: Uuid,
}

/// issue_token
///
/// Signs a session token for `user`. Returns the token and its expiry.
pub fn issue_token(
    user: &User,
    config: &AppConfig,
    now: DateTime<Utc>,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let ttl = i64::try_from(config.token_ttl_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX);
    let expires_at = now
        .checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let claims = Claims {
        sub: user.id.clone(),
        role: user.role.as_str().to_string(),
        iat: now.timestamp().max(0) as usize,
        exp: expires_at.timestamp().max(0) as usize,
        jti: Uuid::new_v4(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;
    Ok((token, expires_at))
}

/// decode_token
///
/// Validates signature and expiry of a session token.
pub fn decode_token(token: &str, config: &AppConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(token, &decoding_key, &validation).map(|data| data.claims)
}

/// Viewer
///
/// The identity a request is rendered for. The role is kept as the raw tag;
/// handlers resolve it with `Viewer::role()` and an unknown tag simply sees
/// nothing rather than failing the request.
#[derive(Debug, Clone)]
pub struct Viewer {
    /// Set when the request carried a session token.
    pub user_id: Option<String>,
    pub role: String,
}

impl Viewer {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Viewer Extractor Implementation
///
/// 1. Local runs: the `x-role` header wins, as set by the role switcher.
/// 2. A bearer token is validated and the referenced user must still exist.
/// 3. Local runs without either fall back to `AppConfig::default_role`.
///
/// Rejection: StatusCode::UNAUTHORIZED (401) for a bad token, or for a missing
/// token in production.
impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by the console middleware for this request.
        if let Some(viewer) = parts.extensions.get::<Viewer>() {
            return Ok(viewer.clone());
        }

        let config = AppConfig::from_ref(state);

        if config.env == Env::Local {
            if let Some(role) = parts
                .headers
                .get(ROLE_HEADER)
                .and_then(|value| value.to_str().ok())
            {
                return Ok(Viewer {
                    user_id: None,
                    role: role.trim().to_string(),
                });
            }
        }

        let Some(token) = bearer_token(parts) else {
            return match config.env {
                Env::Local => Ok(Viewer {
                    user_id: None,
                    role: config.default_role.as_str().to_string(),
                }),
                Env::Production => Err(StatusCode::UNAUTHORIZED),
            };
        };

        let claims = match decode_token(token, &config) {
            Ok(claims) => claims,
            Err(e) => {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("session token expired"),
                    other => tracing::debug!(error = ?other, "session token rejected"),
                }
                return Err(StatusCode::UNAUTHORIZED);
            }
        };

        let repo = RepositoryState::from_ref(state);
        let user = repo
            .get_user(&claims.sub)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Viewer {
            user_id: Some(user.id),
            role: claims.role,
        })
    }
}
