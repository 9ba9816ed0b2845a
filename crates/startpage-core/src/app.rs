use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::{ActiveTimezone, Config, FileStore, KeyValueStore, SettingsStore};

/// Application state shared by every command: config, storage and timezone.
pub struct App {
    config: Arc<Config>,
    store: Arc<dyn KeyValueStore>,
    timezone: ActiveTimezone,
}

impl App {
    /// Load and validate config, then open the file store it points at.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let (config, _) = Config::load_validated(config_path)?;
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage.path));
        tracing::debug!("Using preference storage at {:?}", config.storage.path);
        Ok(Self::with_store(config, store))
    }

    /// Build from an already loaded config and any store.
    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let timezone = ActiveTimezone::new(config.defaults.timezone.clone());
        Self {
            config: Arc::new(config),
            store,
            timezone,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> SettingsStore {
        SettingsStore::new(self.store.clone(), &self.config.defaults)
    }

    pub fn timezone(&self) -> ActiveTimezone {
        self.timezone.clone()
    }
}
