//! Wall clock rendered in the active timezone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use startpage_core::ActiveTimezone;

use crate::elements::TextElement;

#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
}

/// Format `instant` as 24-hour `HH:MM` in the named IANA zone.
pub fn format_clock(instant: DateTime<Utc>, timezone: &str) -> Result<String, ClockError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| ClockError::InvalidTimezone(timezone.to_string()))?;
    Ok(instant.with_timezone(&tz).format("%H:%M").to_string())
}

#[derive(Clone)]
pub struct Clock {
    timezone: ActiveTimezone,
    element: Option<Arc<dyn TextElement>>,
}

impl Clock {
    pub fn new(timezone: ActiveTimezone, element: Option<Arc<dyn TextElement>>) -> Self {
        Self { timezone, element }
    }

    /// Render the current time. An invalid timezone leaves the display as is.
    pub fn tick(&self) {
        if let Err(e) = self.tick_at(Utc::now()) {
            tracing::warn!("Clock not updated: {}", e);
        }
    }

    pub fn tick_at(&self, now: DateTime<Utc>) -> Result<(), ClockError> {
        let time = format_clock(now, &self.timezone.get())?;
        if let Some(element) = &self.element {
            element.set_text(&time);
        }
        Ok(())
    }

    /// Tick now, then once per `period` until the task is aborted.
    pub fn start(self, period: Duration) -> JoinHandle<()> {
        let period = period.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                self.tick();
            }
        })
    }
}
