//! What the weather element shows at each point of a lookup.

use crate::client::LookupOutcome;
use crate::types::WeatherReading;

/// A run of weather text, optionally emphasized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Plain(String),
    Bold(String),
}

impl Fragment {
    pub fn text(&self) -> &str {
        match self {
            Fragment::Plain(s) | Fragment::Bold(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherDisplay {
    Searching(String),
    CityNotFound,
    Error,
    Reading(WeatherReading),
}

impl WeatherDisplay {
    pub fn fragments(&self) -> Vec<Fragment> {
        match self {
            WeatherDisplay::Searching(city) => {
                vec![Fragment::Plain(format!("Searching for {}…", city))]
            }
            WeatherDisplay::CityNotFound => vec![Fragment::Plain("City not found".to_string())],
            WeatherDisplay::Error => vec![Fragment::Plain("Weather error".to_string())],
            WeatherDisplay::Reading(reading) => vec![
                Fragment::Plain(format!("📍 {}: ", reading.location_name)),
                Fragment::Bold(format!("{}°C", reading.temperature_celsius)),
                Fragment::Plain(format!(" – {}", reading.condition().label())),
            ],
        }
    }

    /// Fragments joined without markup.
    pub fn plain_text(&self) -> String {
        self.fragments().iter().map(Fragment::text).collect()
    }
}

impl From<&LookupOutcome> for WeatherDisplay {
    fn from(outcome: &LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Reading(reading) => WeatherDisplay::Reading(reading.clone()),
            LookupOutcome::CityNotFound => WeatherDisplay::CityNotFound,
            LookupOutcome::Failed(_) => WeatherDisplay::Error,
        }
    }
}
