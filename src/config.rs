//! Environment-driven application configuration.

use std::{env, time::Duration};

use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGO_DB: &str = "tourney";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
/// Signing secret used when `JWT_SECRET` is not provided. Fine for local
/// development, unacceptable anywhere tokens matter.
const DEV_JWT_SECRET: &str = "tourney-back-dev-secret";

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the HTTP server binds to.
    pub port: u16,
    /// MongoDB connection URI.
    pub mongo_uri: String,
    /// Database name holding every collection.
    pub mongo_db: String,
    /// Secret signing and verifying session tokens.
    pub jwt_secret: String,
    /// Lifetime of issued session tokens.
    pub token_ttl: Duration,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to development
    /// defaults for anything unset.
    pub fn load() -> Self {
        let port = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let mongo_uri = env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_MONGO_URI.into());
        let mongo_db = env::var("MONGO_DB").unwrap_or_else(|_| DEFAULT_MONGO_DB.into());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set; using the built-in development secret");
            DEV_JWT_SECRET.into()
        });

        let token_ttl = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TOKEN_TTL_SECS));

        Self {
            port,
            mongo_uri,
            mongo_db,
            jwt_secret,
            token_ttl,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            mongo_uri: DEFAULT_MONGO_URI.into(),
            mongo_db: DEFAULT_MONGO_DB.into(),
            jwt_secret: DEV_JWT_SECRET.into(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
        }
    }
}
