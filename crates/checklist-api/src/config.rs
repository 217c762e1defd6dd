//! # Configuration
//!
//! Everything the server reads from its environment, parsed once at startup.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PORT` | `8080` | HTTP listen port |
//! | `APP_PASSWORD` | unset | shared login password; login fails closed when unset |
//! | `JWT_SECRET` | unset | session signing secret; ephemeral key when unset |
//! | `TOKEN_TTL_HOURS` | `168` | session token lifetime |
//! | `LOGGING` | `OFF` | `ON` enables request tracing and client-side logging |
//! | `STATIC_DIR` | `public` | directory served for non-API paths |
//! | `STORAGE` | `postgres` | `postgres` or `memory` |
//! | `DB_HEALTH_INTERVAL_SECS` | `30` | background health check period |
//! | `DB_HOST` / `DB_PORT` | `127.0.0.1` / `5432` | Postgres address |
//! | `DB_USER` / `DB_PASSWORD` | `postgres` / empty | Postgres credentials |
//! | `DB_NAME` | `checklist` | Postgres database |

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;
use zeroize::Zeroizing;

/// Longest accepted session lifetime: ten years.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 10;

/// A configuration value could not be parsed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// A secret string. Zeroized on drop, redacted in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Where lists and items are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Postgres,
    Memory,
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "in-memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown storage mode {other:?}, expected postgres or memory")),
        }
    }
}

/// Postgres connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Secret,
    pub name: String,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose())
            .database(&self.name)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: Secret::new(""),
            name: "checklist".to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub app_password: Option<Secret>,
    pub session_secret: Option<Secret>,
    pub token_ttl: chrono::Duration,
    pub logging: bool,
    pub static_dir: PathBuf,
    pub storage: StorageMode,
    pub health_interval: std::time::Duration,
    pub database: DatabaseConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            app_password: None,
            session_secret: None,
            token_ttl: chrono::Duration::hours(168),
            logging: false,
            static_dir: PathBuf::from("public"),
            storage: StorageMode::Postgres,
            health_interval: std::time::Duration::from_secs(30),
            database: DatabaseConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        let db_defaults = DatabaseConfig::default();

        let ttl_hours: i64 = parse_or(&get, "TOKEN_TTL_HOURS", 168)?;
        let token_ttl = token_ttl(ttl_hours)?;
        let health_secs: u64 = parse_or(&get, "DB_HEALTH_INTERVAL_SECS", 30)?;

        Ok(Self {
            port: parse_or(&get, "PORT", defaults.port)?,
            app_password: lookup("APP_PASSWORD").filter(|v| !v.is_empty()).map(Secret::new),
            session_secret: lookup("JWT_SECRET").filter(|v| !v.is_empty()).map(Secret::new),
            token_ttl,
            logging: get("LOGGING")
                .map(|v| v.trim().eq_ignore_ascii_case("on"))
                .unwrap_or(false),
            static_dir: get("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            storage: parse_or(&get, "STORAGE", defaults.storage)?,
            health_interval: std::time::Duration::from_secs(health_secs.max(1)),
            database: DatabaseConfig {
                host: get("DB_HOST").unwrap_or(db_defaults.host),
                port: parse_or(&get, "DB_PORT", db_defaults.port)?,
                user: get("DB_USER").unwrap_or(db_defaults.user),
                password: lookup("DB_PASSWORD").map(Secret::new).unwrap_or(db_defaults.password),
                name: get("DB_NAME").unwrap_or(db_defaults.name),
            },
        })
    }

    /// `"ON"` or `"OFF"`, as reported to the client.
    pub fn logging_flag(&self) -> &'static str {
        if self.logging {
            "ON"
        } else {
            "OFF"
        }
    }
}

fn token_ttl(hours: i64) -> Result<chrono::Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "TOKEN_TTL_HOURS",
        value: hours.to_string(),
        reason,
    };
    if hours <= 0 {
        return Err(invalid("must be positive".to_string()));
    }
    if hours > MAX_TOKEN_TTL_HOURS {
        return Err(invalid(format!("must be at most {MAX_TOKEN_TTL_HOURS}")));
    }
    chrono::Duration::try_hours(hours).ok_or_else(|| invalid("out of range".to_string()))
}

fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
