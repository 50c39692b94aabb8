use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Application configuration, built once in `main` and handed to the
/// components that need it. There is deliberately no global accessor: the
/// token codec receives the secret and the store connector receives the
/// database settings by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Secret the token codec signs and verifies with. Required; the process
    /// refuses to start without it rather than falling back to a guessable
    /// default.
    #[serde(skip_serializing)]
    pub token_secret: String,
    /// Access tokens expire this many days after issuance. Clients hold no
    /// refresh flow, so changing this only affects newly issued tokens.
    pub token_ttl_days: i64,
}

/// Days a token stays valid when no override is configured.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 15;

impl AppConfig {
    /// Builds the configuration from the process environment. Environment
    /// selects the defaults; individual variables override them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };

        config.security.token_secret =
            env::var("ACCESS_TOKEN_SECRET").map_err(|_| ConfigError::MissingVar("ACCESS_TOKEN_SECRET"))?;
        config.database.url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        config.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT", v.clone()))?;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS", v.clone()))?;
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs = v
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_CONNECT_TIMEOUT_SECS", v.clone()))?;
        }
        if let Ok(v) = env::var("ACCESS_TOKEN_TTL_DAYS") {
            self.security.token_ttl_days = v
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ACCESS_TOKEN_TTL_DAYS", v.clone()))?;
        }
        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            security: SecurityConfig {
                token_secret: String::new(),
                token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            ..Self::development()
        }
    }
}
