//! Weather lookups and pest-risk assessment

use serde::Serialize;
use shared::{
    classify_pest_risk, GpsCoordinates, PestRiskVerdict, WeatherSnapshot, DEFAULT_LOCATION,
};

use crate::config::WeatherConfig;
use crate::error::AppResult;
use crate::external::WeatherClient;

/// Where to look up the weather
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherLookup {
    Coordinates(GpsCoordinates),
    City(String),
}

/// Current conditions together with their pest-risk verdict
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub weather: WeatherSnapshot,
    pub pest_risk: PestRiskVerdict,
    /// True when the readings are canned rather than fetched
    pub mocked: bool,
}

impl WeatherReport {
    pub fn new(weather: WeatherSnapshot, mocked: bool) -> Self {
        let pest_risk = classify_pest_risk(&weather);
        Self {
            weather,
            pest_risk,
            mocked,
        }
    }
}

/// Weather service; serves mock conditions when no provider is configured
#[derive(Clone)]
pub struct WeatherService {
    client: Option<WeatherClient>,
}

impl WeatherService {
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = if config.is_configured() {
            Some(WeatherClient::new(config)?)
        } else {
            tracing::warn!("No weather API key configured, serving mock weather");
            None
        };
        Ok(Self { client })
    }

    /// Service that only ever answers with mock conditions
    pub fn offline() -> Self {
        Self { client: None }
    }

    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }

    /// Current conditions for a location
    pub async fn current(&self, lookup: &WeatherLookup) -> AppResult<WeatherReport> {
        let Some(client) = &self.client else {
            return Ok(WeatherReport::new(mock_for(lookup), true));
        };

        let weather = match lookup {
            WeatherLookup::Coordinates(coords) => client.current_by_coordinates(coords).await?,
            WeatherLookup::City(city) => client.current_by_city(city).await?,
        };

        tracing::debug!(
            location = %weather.location,
            temperature = %weather.temperature_celsius,
            humidity = %weather.humidity_percent,
            "Fetched current weather"
        );

        Ok(WeatherReport::new(weather, false))
    }

    /// Classify a snapshot supplied by the caller
    pub fn assess(&self, weather: WeatherSnapshot) -> PestRiskVerdict {
        classify_pest_risk(&weather.normalized())
    }
}

fn mock_for(lookup: &WeatherLookup) -> WeatherSnapshot {
    match lookup {
        WeatherLookup::City(city) => WeatherSnapshot::mock(city.trim()),
        WeatherLookup::Coordinates(_) => WeatherSnapshot::mock(DEFAULT_LOCATION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::PestRiskLevel;

    #[tokio::test]
    async fn test_offline_service_serves_mock() {
        let service = WeatherService::offline();
        assert!(!service.is_live());

        let report = service
            .current(&WeatherLookup::City(" Coimbatore ".to_string()))
            .await
            .unwrap();

        assert!(report.mocked);
        assert_eq!(report.weather.location, "Coimbatore");
        assert_eq!(report.pest_risk.level, PestRiskLevel::Moderate);
    }

    #[tokio::test]
    async fn test_coordinates_mock_uses_default_location() {
        let service = WeatherService::offline();
        let coords = GpsCoordinates::new(Decimal::new(1108, 2), Decimal::new(7696, 2));

        let report = service
            .current(&WeatherLookup::Coordinates(coords))
            .await
            .unwrap();

        assert_eq!(report.weather.location, DEFAULT_LOCATION);
    }

    #[test]
    fn test_assess_clamps_before_classifying() {
        let service = WeatherService::offline();
        let weather = WeatherSnapshot::new(
            Decimal::from(30),
            Decimal::from(140),
            Decimal::from(-2),
            "Kochi",
            "rain",
        );

        let verdict = service.assess(weather);
        assert_eq!(verdict.level, PestRiskLevel::High);
    }
}
