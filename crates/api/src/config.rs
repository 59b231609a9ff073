use std::str::FromStr;

use anime_core::roles::Role;
use axum::http::HeaderValue;

/// Accounts provisioned when `BASIC_AUTH_USERS` is unset: a USER-only
/// account and an account holding both roles.
pub const DEFAULT_USERS: &str = "luissfmt:academy:USER;devdojo:academy:USER,ADMIN";

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("BASIC_AUTH_USERS entry '{entry}' is invalid: {reason}")]
    InvalidUser { entry: String, reason: String },
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// One account from `BASIC_AUTH_USERS`.
///
/// `secret` is either a PHC-formatted Argon2 hash (`$argon2...`) or a
/// plaintext password that is hashed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    pub username: String,
    pub secret: String,
    pub roles: Vec<Role>,
}

/// Parse `username:secret:ROLE[,ROLE]` entries separated by `;`.
pub fn parse_users(raw: &str) -> Result<Vec<UserEntry>, ConfigError> {
    let mut users: Vec<UserEntry> = Vec::new();

    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = |reason: &str| ConfigError::InvalidUser {
            entry: redact(entry),
            reason: reason.to_string(),
        };

        let mut fields = entry.splitn(3, ':');
        let (Some(username), Some(secret), Some(roles)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(invalid("expected username:secret:ROLES"));
        };

        let username = username.trim();
        if username.is_empty() {
            return Err(invalid("username is empty"));
        }
        if secret.is_empty() {
            return Err(invalid("secret is empty"));
        }
        if users.iter().any(|u| u.username == username) {
            return Err(invalid("duplicate username"));
        }

        let mut parsed_roles = roles
            .split(',')
            .filter(|r| !r.trim().is_empty())
            .map(Role::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(&e.to_string()))?;
        parsed_roles.sort();
        parsed_roles.dedup();
        if parsed_roles.is_empty() {
            return Err(invalid("at least one role is required"));
        }

        users.push(UserEntry {
            username: username.to_string(),
            secret: secret.to_string(),
            roles: parsed_roles,
        });
    }

    Ok(users)
}

/// Keep the username but never echo a secret into error messages.
fn redact(entry: &str) -> String {
    match entry.split_once(':') {
        Some((username, _)) => format!("{username}:***"),
        None => entry.to_string(),
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. When unset the in-memory store is used.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Accounts accepted by the Basic-auth gate.
    pub users: Vec<UserEntry>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `8080`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `DATABASE_URL`             | unset (in-memory store)    |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                       |
    /// | `BASIC_AUTH_USERS`         | [`DEFAULT_USERS`]          |
    /// | `LOG_FORMAT`               | `pretty`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");
        let port = parse_env("PORT", "8080")?;
        let cors_origins = parse_origins(&env_or("CORS_ORIGINS", "http://localhost:5173"))?;
        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", "30")?;
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let database_max_connections = parse_env("DATABASE_MAX_CONNECTIONS", "20")?;
        let users = parse_users(&env_or("BASIC_AUTH_USERS", DEFAULT_USERS))?;
        let log_format = parse_env("LOG_FORMAT", "pretty")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            database_max_connections,
            users,
            log_format,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = env_or(key, default);
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

/// Parse comma-separated CORS origins so misconfiguration fails at startup.
///
/// `*` is refused: the CORS layer allows credentials, which rules out a
/// wildcard origin.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Err(ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: "wildcard origin cannot be combined with credentials; list origins explicitly".into(),
                });
            }
            origin.parse().map_err(|e: axum::http::header::InvalidHeaderValue| {
                ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: e.to_string(),
                }
            })
        })
        .collect()
}
