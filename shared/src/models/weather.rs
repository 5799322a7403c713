//! Weather data models

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Current conditions at the farmer's location.
///
/// Missing or null fields deserialize to zero / empty so the snapshot handed
/// to the pest-risk classifier is always fully formed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    #[serde(rename = "temp", deserialize_with = "null_as_default")]
    pub temperature_celsius: Decimal,
    #[serde(rename = "humidity", deserialize_with = "null_as_default")]
    pub humidity_percent: Decimal,
    #[serde(rename = "rainfall", deserialize_with = "null_as_default")]
    pub rainfall_mm: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl WeatherSnapshot {
    pub fn new(
        temperature_celsius: Decimal,
        humidity_percent: Decimal,
        rainfall_mm: Decimal,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            temperature_celsius,
            humidity_percent,
            rainfall_mm,
            location: location.into(),
            description: description.into(),
        }
    }

    /// Canned conditions for offline use or when no weather provider is configured
    pub fn mock(location: impl Into<String>) -> Self {
        Self::new(
            Decimal::from(28),
            Decimal::from(75),
            Decimal::from(2),
            location,
            "partly cloudy",
        )
    }

    /// Clamp readings into their physical ranges.
    ///
    /// Humidity is kept within 0-100 and rainfall is never negative.
    /// Temperature is left untouched.
    pub fn normalized(mut self) -> Self {
        self.humidity_percent = self
            .humidity_percent
            .max(Decimal::ZERO)
            .min(Decimal::ONE_HUNDRED);
        self.rainfall_mm = self.rainfall_mm.max(Decimal::ZERO);
        self
    }

    /// One-line human readable summary, e.g. "28°C, 75% humidity, partly cloudy"
    pub fn summary(&self) -> String {
        format!(
            "{}°C, {}% humidity, {}",
            self.temperature_celsius.normalize(),
            self.humidity_percent.normalize(),
            self.description
        )
    }
}
