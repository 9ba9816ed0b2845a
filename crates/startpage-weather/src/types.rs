use serde::Deserialize;

use startpage_core::error::ReqwestErrorExt;
use startpage_core::{AppError, NetworkError};

/// Condition buckets for the weather line.
///
/// Buckets are ranges over the WMO code, checked in declaration order; the
/// first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Showers,
    Storm,
    /// Codes 83-94 and anything else no bucket claims
    Other,
}

impl WeatherCondition {
    /// Map a WMO weather code to its bucket.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i64) -> Self {
        if code == 0 {
            Self::Clear
        } else if code <= 3 {
            Self::Cloudy
        } else if code <= 48 {
            Self::Fog
        } else if code <= 67 {
            Self::Rain
        } else if code <= 77 {
            Self::Snow
        } else if code <= 82 {
            Self::Showers
        } else if code >= 95 {
            Self::Storm
        } else {
            Self::Other
        }
    }

    /// Emoji label shown after the temperature.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "☀️ Clear",
            Self::Cloudy => "☁️ Cloudy",
            Self::Fog => "🌫️ Fog",
            Self::Rain => "🌧️ Rain",
            Self::Snow => "🌨️ Snow",
            Self::Showers => "🌧️ Showers",
            Self::Storm => "⚡ Storm",
            Self::Other => "🌥️",
        }
    }
}

/// Label for a raw weather code.
pub fn describe_weather(code: i64) -> &'static str {
    WeatherCondition::from_wmo_code(code).label()
}

/// Round half toward positive infinity, so -2.5 becomes -2.
pub fn round_temperature(celsius: f64) -> i64 {
    let floor = celsius.floor();
    if celsius - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// First geocoder match for a city name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier, e.g. "Asia/Ho_Chi_Minh"
    pub timezone: String,
}

/// Conditions returned by the forecast endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    pub temperature_celsius: i64,
    pub weather_code: i64,
}

/// One finished lookup, rendered and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReading {
    pub location_name: String,
    pub temperature_celsius: i64,
    pub weather_code: i64,
}

impl WeatherReading {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_wmo_code(self.weather_code)
    }
}

/// Weather lookup errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{stage} request returned HTTP {status}")]
    Status { stage: &'static str, status: u16 },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::Network(e) => AppError::Network(e.into_network_error()),
            WeatherError::Status { stage, status } => AppError::Network(NetworkError::ServerError {
                status,
                message: format!("{} request failed", stage),
            }),
            WeatherError::Parse(s) => AppError::Weather(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_clear() {
        assert_eq!(describe_weather(0), "☀️ Clear");
    }

    #[test]
    fn test_code_cloudy() {
        assert_eq!(describe_weather(1), "☁️ Cloudy");
        assert_eq!(describe_weather(2), "☁️ Cloudy");
        assert_eq!(describe_weather(3), "☁️ Cloudy");
    }

    #[test]
    fn test_code_fog() {
        assert_eq!(describe_weather(45), "🌫️ Fog");
        assert_eq!(describe_weather(48), "🌫️ Fog");
    }

    #[test]
    fn test_code_rain_includes_drizzle_range() {
        assert_eq!(describe_weather(51), "🌧️ Rain");
        assert_eq!(describe_weather(61), "🌧️ Rain");
        assert_eq!(describe_weather(67), "🌧️ Rain");
    }

    #[test]
    fn test_code_snow() {
        assert_eq!(describe_weather(71), "🌨️ Snow");
        assert_eq!(describe_weather(77), "🌨️ Snow");
    }

    #[test]
    fn test_code_showers() {
        assert_eq!(describe_weather(80), "🌧️ Showers");
        assert_eq!(describe_weather(82), "🌧️ Showers");
    }

    #[test]
    fn test_code_storm() {
        assert_eq!(describe_weather(95), "⚡ Storm");
        assert_eq!(describe_weather(96), "⚡ Storm");
        assert_eq!(describe_weather(99), "⚡ Storm");
    }

    #[test]
    fn test_gap_between_showers_and_storm_falls_through() {
        for code in 83..=94 {
            assert_eq!(describe_weather(code), "🌥️", "code {}", code);
        }
        assert_eq!(WeatherCondition::from_wmo_code(90), WeatherCondition::Other);
    }

    #[test]
    fn test_negative_code_is_cloudy() {
        assert_eq!(describe_weather(-1), "☁️ Cloudy");
    }

    #[test]
    fn test_rounding_matches_half_up() {
        assert_eq!(round_temperature(21.4), 21);
        assert_eq!(round_temperature(21.5), 22);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.6), -3);
        assert_eq!(round_temperature(0.0), 0);
    }

    #[test]
    fn test_rounding_just_below_half_stays_down() {
        assert_eq!(round_temperature(0.499_999_999_999_999_94), 0);
        assert_eq!(round_temperature(-0.5), 0);
        assert_eq!(round_temperature(-0.500_000_000_000_000_1), -1);
    }

    #[test]
    fn test_status_maps_to_server_error() {
        let app: AppError = WeatherError::Status {
            stage: "forecast",
            status: 502,
        }
        .into();
        assert!(matches!(
            app,
            AppError::Network(NetworkError::ServerError { status: 502, .. })
        ));
    }

    #[test]
    fn test_parse_maps_to_generic_message() {
        let app: AppError = WeatherError::Parse("missing field".into()).into();
        assert_eq!(app.user_message(), "Weather error");
    }

    #[test]
    fn test_reading_condition() {
        let reading = WeatherReading {
            location_name: "Hanoi".into(),
            temperature_celsius: 30,
            weather_code: 61,
        };
        assert_eq!(reading.condition(), WeatherCondition::Rain);
    }
}
