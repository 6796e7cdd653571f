//! Process configuration, read once at startup.
//!
//! Everything the service needs from the environment is collected into
//! [`Config`] and handed to the pool and session middleware by value, so no
//! handler reads environment variables.

use actix_web::cookie::Key;
use log::warn;
use std::env;
use std::fmt;
use std::time::Duration;

const SECRET_KEY_MIN_LEN: usize = 64;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_PG_HOST: &str = "127.0.0.1";
const DEFAULT_PG_PORT: &str = "5432";
const DEFAULT_PG_USER: &str = "postgres";
const DEFAULT_PG_DATABASE: &str = "employees";

pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_max_lifetime: Duration,
    pub bind_addr: String,
    pub session: SessionSettings,
}

#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for the session cookie.
    pub key: Key,
    pub cookie_secure: bool,
    pub ttl_minutes: i64,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingSecretKey,
    SecretKeyTooShort { length: usize },
    InvalidNumber { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingSecretKey => write!(f, "SECRET_KEY must be set in release builds"),
            ConfigError::SecretKeyTooShort { length } => write!(
                f,
                "SECRET_KEY too short: need >= {} bytes, got {}",
                SECRET_KEY_MIN_LEN, length
            ),
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "invalid value for {}='{}'; expected a positive integer", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok(), cfg!(debug_assertions))
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// `allow_ephemeral_key` permits a generated session key when
    /// `SECRET_KEY` is unset; sessions then do not survive a restart.
    pub fn from_lookup<F>(lookup: F, allow_ephemeral_key: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = database_url(&lookup);
        let db_max_connections = parse_number(&lookup, "DB_MAX_CONNECTIONS", 5)?;
        let db_max_lifetime = Duration::from_secs(parse_number(&lookup, "DB_MAX_LIFETIME_SECS", 1800)?);
        let bind_addr = lookup("BIND_ADDR")
            .filter(|addr| !addr.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let key = match lookup("SECRET_KEY").filter(|secret| !secret.is_empty()) {
            Some(secret) if secret.len() < SECRET_KEY_MIN_LEN => {
                return Err(ConfigError::SecretKeyTooShort { length: secret.len() })
            }
            Some(secret) => Key::derive_from(secret.as_bytes()),
            None if allow_ephemeral_key => {
                warn!("SECRET_KEY not set; using a temporary session key (dev only)");
                Key::generate()
            }
            None => return Err(ConfigError::MissingSecretKey),
        };

        let cookie_secure = lookup("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);
        let ttl_minutes = parse_number(&lookup, "SESSION_TTL_MINUTES", 120)?;

        Ok(Config {
            database_url,
            db_max_connections,
            db_max_lifetime,
            bind_addr,
            session: SessionSettings {
                key,
                cookie_secure,
                ttl_minutes,
            },
        })
    }
}

/// `DATABASE_URL` wins; otherwise the URL is assembled from the libpq-style
/// `PG*` variables.
fn database_url<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
        return url;
    }
    let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
    format!(
        "postgres://{}:{}@{}:{}/{}",
        var("PGUSER", DEFAULT_PG_USER),
        var("PGPASSWORD", ""),
        var("PGHOST", DEFAULT_PG_HOST),
        var("PGPORT", DEFAULT_PG_PORT),
        var("PGDATABASE", DEFAULT_PG_DATABASE),
    )
}

fn parse_number<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value > T::default() => Ok(value),
            _ => Err(ConfigError::InvalidNumber { name, value: raw }),
        },
    }
}
