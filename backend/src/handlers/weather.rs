//! HTTP handlers for weather and pest-risk endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    validate_coordinates, validate_location, validate_weather_readings, GpsCoordinates,
    PestRiskVerdict, WeatherSnapshot,
};

use crate::error::{AppError, AppResult};
use crate::services::{WeatherLookup, WeatherReport};
use crate::AppState;

/// Either coordinates or a city name
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub city: Option<String>,
}

impl WeatherQuery {
    /// Coordinates win when both forms are given
    fn into_lookup(self) -> AppResult<WeatherLookup> {
        match (self.latitude, self.longitude, self.city) {
            (Some(latitude), Some(longitude), _) => {
                let coords = GpsCoordinates::new(latitude, longitude);
                validate_coordinates(&coords).map_err(|e| AppError::Validation {
                    field: "coordinates".to_string(),
                    message: e.to_string(),
                })?;
                Ok(WeatherLookup::Coordinates(coords))
            }
            (_, _, Some(city)) => {
                validate_location(&city).map_err(|e| AppError::Validation {
                    field: "city".to_string(),
                    message: e.to_string(),
                })?;
                Ok(WeatherLookup::City(city.trim().to_string()))
            }
            _ => Err(AppError::ValidationError(
                "Provide latitude and longitude, or a city".to_string(),
            )),
        }
    }
}

/// Current weather with its pest-risk verdict
pub async fn current_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<WeatherReport>> {
    let lookup = query.into_lookup()?;
    let report = state.weather.current(&lookup).await?;
    Ok(Json(report))
}

/// Classify caller-supplied conditions
pub async fn assess_pest_risk(
    State(state): State<AppState>,
    Json(weather): Json<WeatherSnapshot>,
) -> AppResult<Json<PestRiskVerdict>> {
    validate_weather_readings(&weather).map_err(|e| AppError::Validation {
        field: "weather".to_string(),
        message: e.to_string(),
    })?;

    Ok(Json(state.weather.assess(weather)))
}
