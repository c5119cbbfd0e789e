use serde::Deserialize;

use super::optional;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub app_name: String,
    pub app_version: String,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_config(&super::load_env()?)
    }

    pub fn from_config(cfg: &config::Config) -> Result<Self, config::ConfigError> {
        let port = match optional(cfg.get_int("PORT"))? {
            Some(port) => u16::try_from(port)
                .map_err(|_| config::ConfigError::Message(format!("PORT out of range: {}", port)))?,
            None => 3000,
        };

        Ok(Self {
            host: cfg.get_string("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            environment: cfg.get_string("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            app_name: cfg.get_string("APP_NAME").unwrap_or_else(|_| "users-service".to_string()),
            app_version: cfg
                .get_string("APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            static_dir: cfg.get_string("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
