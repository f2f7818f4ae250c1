use std::env;

use crate::roles::Role;

/// Fallback signing secret outside production.
pub const LOCAL_JWT_SECRET: &str = "isp-console-local-secret-value";

/// AppConfig
///
/// Holds the application's configuration. Loaded once at startup and shared
/// read-only through the application state via FromRef.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the role-switcher header bypass.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // HS256 secret used to sign and validate session tokens.
    pub jwt_secret: String,
    // Lifetime of issued session tokens, in seconds.
    pub token_ttl_secs: u64,
    // Role assumed for local requests that carry no `x-role` header.
    pub default_role: Role,
}

/// Env
///
/// Local runs trust the role switcher header; production only trusts signed
/// session tokens.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Safe, non-panicking values for tests.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:3000".to_string(),
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            token_ttl_secs: 3600,
            default_role: Role::SystemAdmin,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in production when `CONSOLE_JWT_SECRET` is not set, so the service
    /// never starts signing tokens with the public local secret.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let jwt_secret = match env {
            Env::Production => env::var("CONSOLE_JWT_SECRET")
                .expect("FATAL: CONSOLE_JWT_SECRET must be set in production."),
            Env::Local => {
                env::var("CONSOLE_JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string())
            }
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3600);

        // An unknown tag falls back rather than aborting startup.
        let default_role = env::var("DEFAULT_ROLE")
            .ok()
            .and_then(|tag| Role::parse(tag.trim()))
            .unwrap_or(Role::SystemAdmin);

        Self {
            env,
            bind_addr,
            jwt_secret,
            token_ttl_secs,
            default_role,
        }
    }
}
