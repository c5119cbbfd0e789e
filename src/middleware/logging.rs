use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Daily-rolled JSON log file; `None` logs to the console only
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_config(&crate::config::load_env()?)
    }

    pub fn from_config(cfg: &config::Config) -> Result<Self, config::ConfigError> {
        let file = cfg.get_string("LOG_FILE").unwrap_or_else(|_| "logs/app.log".to_string());

        Ok(Self {
            level: cfg.get_string("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            file: if file.trim().is_empty() { None } else { Some(file) },
        })
    }
}

/// Setup logging with console and optional file output.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the lifetime of the process.
pub fn setup_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact();

    let (file_layer, guard) = match config.file.as_deref().map(Path::new) {
        Some(path) => {
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("logs"));
            let file_name = path.file_name().unwrap_or(std::ffi::OsStr::new("app.log"));

            // Create logs directory if it doesn't exist
            std::fs::create_dir_all(directory).ok();

            let appender = RollingFileAppender::new(Rotation::DAILY, directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .json();

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!(level = %config.level, file = ?config.file, "logging initialized");

    guard
}
