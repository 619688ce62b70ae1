use std::time::Duration;

use roster_db::PoolSettings;

use crate::auth::session::SessionConfig;

/// Credentials for the account created at startup when it does not exist yet.
#[derive(Debug, Clone)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Connection pool sizing.
    pub database: PoolSettings,
    /// Session token signing and cookie flags.
    pub session: SessionConfig,
    /// Timeout for fetching a character photo during export (default: `10`).
    pub photo_fetch_timeout_secs: u64,
    /// Largest photo body accepted during export (default: 5 MiB).
    pub photo_max_bytes: usize,
    /// Account to create at startup, if both seed variables are set.
    pub seed_user: Option<SeedUser>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default       |
    /// |----------------------------|---------------|
    /// | `HOST`                     | `0.0.0.0`     |
    /// | `PORT`                     | `3000`        |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`          |
    /// | `DB_MAX_CONNECTIONS`       | `10`          |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`  | `5`           |
    /// | `PHOTO_FETCH_TIMEOUT_SECS` | `10`          |
    /// | `PHOTO_MAX_BYTES`          | `5242880`     |
    /// | `SEED_USERNAME`            | unset         |
    /// | `SEED_PASSWORD`            | unset         |
    ///
    /// Session variables are read by [`SessionConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let acquire_timeout_secs: u64 = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64");

        let photo_fetch_timeout_secs: u64 = std::env::var("PHOTO_FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("PHOTO_FETCH_TIMEOUT_SECS must be a valid u64");

        let photo_max_bytes: usize = std::env::var("PHOTO_MAX_BYTES")
            .unwrap_or_else(|_| "5242880".into())
            .parse()
            .expect("PHOTO_MAX_BYTES must be a valid usize");

        let seed_user = match (
            std::env::var("SEED_USERNAME"),
            std::env::var("SEED_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.trim().is_empty() => Some(SeedUser {
                username: username.trim().to_string(),
                password,
            }),
            _ => None,
        };

        Self {
            host,
            port,
            request_timeout_secs,
            database: PoolSettings {
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
            session: SessionConfig::from_env(),
            photo_fetch_timeout_secs,
            photo_max_bytes,
            seed_user,
        }
    }

    pub fn photo_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.photo_fetch_timeout_secs)
    }
}
