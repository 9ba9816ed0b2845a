//! Integration tests for WeatherClient using wiremock.
//!
//! The mock server stands in for both the geocoding and the forecast API.

#![allow(clippy::unwrap_used, clippy::panic)]

use startpage_core::{ActiveTimezone, WeatherConfig};
use startpage_weather::{
    GeocodeOutcome, LookupOutcome, WeatherClient, WeatherDisplay, WeatherError,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FALLBACK_TZ: &str = "Asia/Ho_Chi_Minh";

fn client_for(server: &MockServer) -> WeatherClient {
    let config = WeatherConfig {
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        request_timeout_secs: Some(5),
    };
    WeatherClient::new(&config).unwrap()
}

fn tokyo() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "name": "Tokyo",
            "latitude": 35.6895,
            "longitude": 139.69171,
            "timezone": "Asia/Tokyo"
        }]
    })
}

async fn mount_geocode(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("count", "1"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lookup_success() {
    let server = MockServer::start().await;
    mount_geocode(&server, tokyo()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "35.6895"))
        .and(query_param("longitude", "139.69171"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": { "temperature": 21.6, "weathercode": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tz = ActiveTimezone::new(FALLBACK_TZ);

    let outcome = client.lookup("Tokyo", &tz).await;
    let LookupOutcome::Reading(reading) = &outcome else {
        panic!("expected a reading, got {:?}", outcome);
    };
    assert_eq!(reading.location_name, "Tokyo");
    assert_eq!(reading.temperature_celsius, 22);
    assert_eq!(reading.weather_code, 2);
    assert_eq!(tz.get(), "Asia/Tokyo");
    assert_eq!(
        WeatherDisplay::from(&outcome).plain_text(),
        "📍 Tokyo: 22°C – ☁️ Cloudy"
    );
}

#[tokio::test]
async fn test_city_name_is_sent_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Ho Chi Minh City"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.geocode("Ho Chi Minh City").await.unwrap();
    assert_eq!(outcome, GeocodeOutcome::NotFound);
}

#[tokio::test]
async fn test_empty_results_is_city_not_found() {
    let server = MockServer::start().await;
    mount_geocode(&server, serde_json::json!({ "results": [] })).await;

    let client = client_for(&server);
    let tz = ActiveTimezone::new(FALLBACK_TZ);

    let outcome = client.lookup("Atlantis", &tz).await;
    assert!(matches!(outcome, LookupOutcome::CityNotFound));
    assert_eq!(WeatherDisplay::from(&outcome).plain_text(), "City not found");
    assert_eq!(tz.get(), FALLBACK_TZ);
}

#[tokio::test]
async fn test_missing_results_is_city_not_found() {
    let server = MockServer::start().await;
    mount_geocode(&server, serde_json::json!({ "generationtime_ms": 0.4 })).await;

    let client = client_for(&server);
    let outcome = client.lookup("Nowhere", &ActiveTimezone::new(FALLBACK_TZ)).await;
    assert!(matches!(outcome, LookupOutcome::CityNotFound));
}

#[tokio::test]
async fn test_geocode_server_error_is_fault() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tz = ActiveTimezone::new(FALLBACK_TZ);

    let outcome = client.lookup("Tokyo", &tz).await;
    assert!(matches!(outcome, LookupOutcome::Failed(_)));
    assert_eq!(WeatherDisplay::from(&outcome).plain_text(), "Weather error");
    assert_eq!(tz.get(), FALLBACK_TZ);
}

#[tokio::test]
async fn test_forecast_failure_keeps_new_timezone() {
    let server = MockServer::start().await;
    mount_geocode(&server, tokyo()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tz = ActiveTimezone::new(FALLBACK_TZ);

    let outcome = client.lookup("Tokyo", &tz).await;
    assert!(matches!(outcome, LookupOutcome::Failed(_)));
    assert_eq!(WeatherDisplay::from(&outcome).plain_text(), "Weather error");
    assert_eq!(tz.get(), "Asia/Tokyo");
}

#[tokio::test]
async fn test_forecast_missing_fields_is_fault() {
    let server = MockServer::start().await;
    mount_geocode(&server, tokyo()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hourly": {}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.lookup("Tokyo", &ActiveTimezone::new(FALLBACK_TZ)).await;
    assert!(matches!(outcome, LookupOutcome::Failed(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_fault() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let outcome = client.lookup("Tokyo", &ActiveTimezone::new(FALLBACK_TZ)).await;
    assert!(matches!(outcome, LookupOutcome::Failed(_)));
}

#[tokio::test]
async fn test_forecast_server_error_keeps_new_timezone() {
    let server = MockServer::start().await;
    mount_geocode(&server, tokyo()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tz = ActiveTimezone::new(FALLBACK_TZ);

    let outcome = client.lookup("Tokyo", &tz).await;
    assert!(matches!(
        outcome,
        LookupOutcome::Failed(WeatherError::Status {
            stage: "forecast",
            status: 500
        })
    ));
    assert_eq!(WeatherDisplay::from(&outcome).plain_text(), "Weather error");
    assert_eq!(tz.get(), "Asia/Tokyo");
}

#[tokio::test]
async fn test_forecast_unreachable_keeps_new_timezone() {
    let geocoder = MockServer::start().await;
    mount_geocode(&geocoder, tokyo()).await;

    let forecast = MockServer::start().await;
    let forecast_url = format!("{}/v1/forecast", forecast.uri());
    drop(forecast);

    let client = WeatherClient::new(&WeatherConfig {
        geocoding_url: format!("{}/v1/search", geocoder.uri()),
        forecast_url,
        request_timeout_secs: Some(5),
    })
    .unwrap();
    let tz = ActiveTimezone::new(FALLBACK_TZ);

    let outcome = client.lookup("Tokyo", &tz).await;
    assert!(matches!(
        outcome,
        LookupOutcome::Failed(WeatherError::Network(_))
    ));
    assert_eq!(WeatherDisplay::from(&outcome).plain_text(), "Weather error");
    assert_eq!(tz.get(), "Asia/Tokyo");
}
