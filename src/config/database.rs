use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use super::optional;

/// Which `UserStore` backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Postgres => "postgres",
            StoreKind::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreKind {
    type Err = config::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" | "in-memory" => Ok(StoreKind::Memory),
            other => Err(config::ConfigError::Message(format!(
                "USER_STORE must be `postgres` or `memory`, got `{}`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub store: StoreKind,
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_config(&super::load_env()?)
    }

    pub fn from_config(cfg: &config::Config) -> Result<Self, config::ConfigError> {
        let store = match optional(cfg.get_string("USER_STORE"))? {
            Some(kind) => kind.parse()?,
            None => StoreKind::Postgres,
        };

        let max_connections = optional(cfg.get_int("DATABASE_MAX_CONNECTIONS"))?.unwrap_or(10);
        let acquire_timeout = optional(cfg.get_int("DATABASE_ACQUIRE_TIMEOUT_SECS"))?.unwrap_or(5);

        Ok(Self {
            store,
            url: cfg
                .get_string("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/mydatabase".to_string()),
            max_connections: u32::try_from(max_connections).map_err(|_| {
                config::ConfigError::Message(format!("DATABASE_MAX_CONNECTIONS out of range: {}", max_connections))
            })?,
            acquire_timeout: Duration::from_secs(u64::try_from(acquire_timeout).map_err(|_| {
                config::ConfigError::Message(format!(
                    "DATABASE_ACQUIRE_TIMEOUT_SECS out of range: {}",
                    acquire_timeout
                ))
            })?),
        })
    }

    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect(&self.url)
            .await
    }
}

/// Apply the embedded migrations under `./migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
}
