//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current weather API

use std::time::Duration;

use reqwest::Client;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use shared::{GpsCoordinates, WeatherSnapshot};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    country_code: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    #[serde(default)]
    weather: Vec<OWMWeather>,
    main: OWMMain,
    rain: Option<OWMRain>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    #[serde(default)]
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Weather HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.clone(),
            country_code: config.country_code.clone(),
        })
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn current_by_coordinates(
        &self,
        coords: &GpsCoordinates,
    ) -> AppResult<WeatherSnapshot> {
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();
        self.fetch(&[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await
    }

    /// Fetch current weather conditions by city name
    pub async fn current_by_city(&self, city: &str) -> AppResult<WeatherSnapshot> {
        let query = format!("{},{}", city.trim(), self.country_code);
        self.fetch(&[("q", query.as_str())]).await
    }

    async fn fetch(&self, location: &[(&str, &str)]) -> AppResult<WeatherSnapshot> {
        let response = self
            .client
            .get(&self.base_url)
            .query(location)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                AppError::WeatherServiceUnavailable(format!("Weather API request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherServiceUnavailable(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::WeatherServiceUnavailable(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(convert_current_response(data))
    }
}

/// Convert OpenWeatherMap current response to our format.
///
/// Temperature is rounded to a whole degree; missing rain means no rain.
fn convert_current_response(data: OWMCurrentResponse) -> WeatherSnapshot {
    let temperature = Decimal::from_f64_retain(data.main.temp)
        .unwrap_or_default()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let humidity = Decimal::try_from(data.main.humidity).unwrap_or_default();
    let rainfall = data
        .rain
        .and_then(|r| r.one_hour)
        .and_then(|mm| Decimal::try_from(mm).ok())
        .unwrap_or_default();
    let description = data
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .unwrap_or_default();

    WeatherSnapshot::new(temperature, humidity, rainfall, data.name, description).normalized()
}
