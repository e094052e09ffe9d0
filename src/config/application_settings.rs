use std::env;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} environment variable not found")]
    Missing { key: &'static str },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Immutable application configuration, loaded once at startup and shared
/// read-only across requests.
#[derive(Debug, Clone)]
pub struct ApplicationSettings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub expire_minutes: i64,
}

impl ApplicationSettings {
    /// Load all settings from environment variables.
    ///
    /// Every value is required; a missing or unparsable value is a startup
    /// configuration error, not a runtime fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_env("SERVER_PORT")?;
        let database_url = require_env("DATABASE_URL")?;
        let jwt_secret = require_env("JWT_SECRET")?;
        let expire_minutes = parse_env("JWT_EXPIRE_MINUTE")?;

        Ok(Self {
            server: ServerSettings { port },
            database: DatabaseSettings { url: database_url },
            jwt: JwtSettings {
                secret: jwt_secret,
                expire_minutes,
            },
        })
    }
}

fn require_env(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing { key })
}

fn parse_env<T>(key: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    require_env(key)?
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        })
}
