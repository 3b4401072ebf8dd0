use std::str::FromStr;

use lumen_core::credits::DEFAULT_FREE_CREDITS;
use lumen_gateway::GatewayConfig;

use crate::auth::jwt::JwtConfig;

/// Default HTTP request timeout. Must stay above the gateway timeout.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 150;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `150`).
    pub request_timeout_secs: u64,
    /// Free credits granted when a balance is first created (default: `50`).
    pub default_free_credits: i32,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Upstream generation gateway settings.
    pub gateway: GatewayConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `150`     |
    /// | `DEFAULT_FREE_CREDITS` | `50`      |
    ///
    /// JWT and gateway variables are documented on [`JwtConfig::from_env`]
    /// and [`GatewayConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        Self {
            host,
            port: env_or("PORT", 3000),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            default_free_credits: env_or("DEFAULT_FREE_CREDITS", DEFAULT_FREE_CREDITS),
            jwt: JwtConfig::from_env(),
            gateway: GatewayConfig::from_env(),
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when
/// unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse as `T`.
pub fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
