pub mod app_config;
pub mod app_state;
pub mod database;

pub use app_config::AppConfig;
pub use app_state::AppState;
pub use database::{DatabaseConfig, StoreKind};

/// Load `.env` (if any) and build a config backed by the process environment.
pub fn load_env() -> Result<config::Config, config::ConfigError> {
    dotenv::dotenv().ok();

    config::Config::builder()
        .add_source(config::Environment::default())
        .build()
}

/// Treat a missing key as `None` while still surfacing type errors.
pub(crate) fn optional<T>(value: Result<T, config::ConfigError>) -> Result<Option<T>, config::ConfigError> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
