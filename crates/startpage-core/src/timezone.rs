//! Timezone shared between the weather lookup and the clock.

use parking_lot::RwLock;
use std::sync::Arc;

/// Handle to the IANA timezone the clock renders in.
///
/// Clones share the same value. The weather lookup overwrites it whenever a
/// geocode resolves a city; the clock reads it on every tick.
#[derive(Debug, Clone)]
pub struct ActiveTimezone {
    inner: Arc<RwLock<String>>,
}

impl ActiveTimezone {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(fallback.into())),
        }
    }

    pub fn get(&self) -> String {
        self.inner.read().clone()
    }

    pub fn set(&self, timezone: impl Into<String>) {
        let timezone = timezone.into();
        tracing::debug!("Active timezone set to {}", timezone);
        *self.inner.write() = timezone;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_updates() {
        let tz = ActiveTimezone::new("Asia/Ho_Chi_Minh");
        let clock_view = tz.clone();
        assert_eq!(clock_view.get(), "Asia/Ho_Chi_Minh");

        tz.set("Europe/Paris");
        assert_eq!(clock_view.get(), "Europe/Paris");
    }
}
