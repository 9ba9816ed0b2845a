//! Open-Meteo client: geocode a city, then fetch its current weather.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use startpage_core::{ActiveTimezone, WeatherConfig};

use crate::types::{round_temperature, CurrentConditions, Place, WeatherError, WeatherReading};

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Option<Vec<Place>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: ApiCurrentWeather,
}

#[derive(Debug, Deserialize)]
struct ApiCurrentWeather {
    temperature: f64,
    weathercode: i64,
}

/// Result of the geocoding stage.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Found(Place),
    /// The geocoder answered but had no match; not a fault.
    NotFound,
}

/// Result of a full two-stage lookup.
#[derive(Debug)]
pub enum LookupOutcome {
    Reading(WeatherReading),
    CityNotFound,
    Failed(WeatherError),
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    /// Resolve a city name to its top match.
    #[instrument(skip(self), level = "debug")]
    pub async fn geocode(&self, city: &str) -> Result<GeocodeOutcome, WeatherError> {
        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[("name", city), ("count", "1"), ("format", "json")])
            .send()
            .await?;

        let body: GeocodeResponse = Self::read_json("geocoding", response).await?;
        match body.results.and_then(|results| results.into_iter().next()) {
            Some(place) => Ok(GeocodeOutcome::Found(place)),
            None => Ok(GeocodeOutcome::NotFound),
        }
    }

    /// Fetch current conditions at a place's coordinates.
    #[instrument(skip(self, place), fields(place = %place.name), level = "debug")]
    pub async fn current_weather(&self, place: &Place) -> Result<CurrentConditions, WeatherError> {
        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?;

        let body: ForecastResponse = Self::read_json("forecast", response).await?;
        Ok(CurrentConditions {
            temperature_celsius: round_temperature(body.current_weather.temperature),
            weather_code: body.current_weather.weathercode,
        })
    }

    /// Geocode `city`, point `timezone` at the match, then fetch its weather.
    ///
    /// The timezone is updated before the forecast request is sent, so the
    /// clock switches even if the second stage fails.
    pub async fn lookup(&self, city: &str, timezone: &ActiveTimezone) -> LookupOutcome {
        let place = match self.geocode(city).await {
            Ok(GeocodeOutcome::Found(place)) => place,
            Ok(GeocodeOutcome::NotFound) => {
                tracing::info!("No geocoding match for {:?}", city);
                return LookupOutcome::CityNotFound;
            }
            Err(e) => {
                tracing::error!("Geocoding {:?} failed: {}", city, e);
                return LookupOutcome::Failed(e);
            }
        };

        timezone.set(place.timezone.clone());

        match self.current_weather(&place).await {
            Ok(conditions) => {
                tracing::info!(
                    "Weather for {}: {}°C (code {})",
                    place.name,
                    conditions.temperature_celsius,
                    conditions.weather_code
                );
                LookupOutcome::Reading(WeatherReading {
                    location_name: place.name,
                    temperature_celsius: conditions.temperature_celsius,
                    weather_code: conditions.weather_code,
                })
            }
            Err(e) => {
                tracing::error!("Weather fetch for {} failed: {}", place.name, e);
                LookupOutcome::Failed(e)
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(
        stage: &'static str,
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                stage,
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| WeatherError::Parse(format!("{} response: {}", stage, e)))
    }
}
