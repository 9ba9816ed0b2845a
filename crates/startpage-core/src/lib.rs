pub mod app;
pub mod config;
pub mod error;
pub mod settings;
pub mod storage;
pub mod timezone;

pub use app::App;
pub use config::{
    ClockConfig, Config, DefaultsConfig, SearchConfig, StorageConfig, ValidationResult,
    WeatherConfig,
};
pub use error::{AppError, ConfigError, NetworkError, StorageError};
pub use settings::{Preferences, SettingsStore, BACKGROUND_KEY, CITY_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use timezone::ActiveTimezone;

use anyhow::Result;

/// Initialize logging for the process.
///
/// Logs go to stderr so they never interleave with the rendered page on stdout.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Startpage core initialized");
    Ok(())
}
