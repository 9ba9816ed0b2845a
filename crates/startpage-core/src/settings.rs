//! Start page preferences: background image and city.

use std::sync::Arc;

use crate::config::DefaultsConfig;
use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Storage key for the background image URL or path.
pub const BACKGROUND_KEY: &str = "startpage_bg";
/// Storage key for the weather city.
pub const CITY_KEY: &str = "startpage_city";

/// Resolved preferences; both fields always hold a usable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub background: String,
    pub city: String,
}

impl Preferences {
    /// CSS `background-image` value for the page body.
    pub fn background_css(&self) -> String {
        format!("url('{}')", self.background)
    }
}

/// Reads and writes [`Preferences`] through a [`KeyValueStore`].
#[derive(Clone)]
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
    default_city: String,
    default_background: String,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KeyValueStore>, defaults: &DefaultsConfig) -> Self {
        Self {
            store,
            default_city: defaults.city.clone(),
            default_background: defaults.background.clone(),
        }
    }

    /// Load preferences, substituting defaults for missing or empty values.
    pub fn load(&self) -> Result<Preferences, StorageError> {
        let background = self.get_or(BACKGROUND_KEY, &self.default_background)?;
        let city = self.get_or(CITY_KEY, &self.default_city)?;
        Ok(Preferences { background, city })
    }

    /// Load just the city, with the same fallback rule as [`load`](Self::load).
    pub fn city(&self) -> Result<String, StorageError> {
        self.get_or(CITY_KEY, &self.default_city)
    }

    /// Overwrite both preferences verbatim.
    pub fn save(&self, background: &str, city: &str) -> Result<(), StorageError> {
        self.store.set(BACKGROUND_KEY, background)?;
        self.store.set(CITY_KEY, city)?;
        tracing::info!("Saved preferences (city: {})", city);
        Ok(())
    }

    /// Defaults used when nothing usable is stored.
    pub fn defaults(&self) -> Preferences {
        Preferences {
            background: self.default_background.clone(),
            city: self.default_city.clone(),
        }
    }

    fn get_or(&self, key: &str, default: &str) -> Result<String, StorageError> {
        Ok(self
            .store
            .get(key)?
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }
}
