//! Image Analysis Client
//!
//! Client for the remote plant-disease analysis service. The service takes a
//! leaf photo plus the farmer's coordinates and answers with a disease label,
//! a confidence percentage, local weather and, optionally, an LLM write-up.

use std::time::Duration;

use reqwest::{multipart, Client};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{AnalysisResult, GpsCoordinates, ImagePayload, LlmAnalysis, WeatherSnapshot};

use crate::config::AnalysisConfig;
use crate::error::{AppError, AppResult};

/// Client for the image analysis service
#[derive(Clone)]
pub struct AnalysisClient {
    endpoint: String,
    http_client: Client,
}

/// Response from `POST /analyze`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub disease: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub weather: Option<AnalyzedWeather>,
    #[serde(default)]
    pub llm_analysis: Option<LlmAnalysis>,
}

/// Weather block of the analysis response; every field may be absent
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzedWeather {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
    pub conditions: Option<String>,
    pub location: Option<String>,
}

impl AnalyzedWeather {
    /// Fill the gaps: readings default to 0, the location to the session's
    /// own and the description to "N/A"
    pub fn into_snapshot(self, fallback_location: &str) -> WeatherSnapshot {
        // Shortest decimal form of the float, never quantized, so strict
        // thresholds see the reading as sent
        let reading = |value: Option<f64>| {
            value
                .and_then(|v| Decimal::try_from(v).ok())
                .unwrap_or_default()
        };

        WeatherSnapshot::new(
            reading(self.temp),
            reading(self.humidity),
            reading(self.rainfall),
            self.location
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| fallback_location.to_string()),
            self.conditions.unwrap_or_else(|| "N/A".to_string()),
        )
        .normalized()
    }
}

impl AnalyzeResponse {
    /// Build the session-level result. `llm_analysis` is used only when the
    /// service did not return its own write-up.
    pub fn into_result(self, fallback_location: &str, llm_analysis: LlmAnalysis) -> AnalysisResult {
        let weather = self
            .weather
            .unwrap_or_default()
            .into_snapshot(fallback_location);

        AnalysisResult::new(
            self.disease,
            self.confidence,
            weather,
            self.llm_analysis.unwrap_or(llm_analysis),
        )
    }
}

impl AnalysisClient {
    /// Create a new analysis client from configuration
    pub fn new(config: &AnalysisConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Analysis HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Upload an image for diagnosis
    pub async fn analyze(
        &self,
        image: ImagePayload,
        coords: &GpsCoordinates,
    ) -> AppResult<AnalyzeResponse> {
        let url = format!("{}/analyze", self.endpoint);
        let file_name = image.file_name();

        let part = multipart::Part::bytes(image.bytes)
            .file_name(file_name)
            .mime_str(&image.mime_type)
            .map_err(|e| AppError::ImageRejected(format!("Invalid image type: {}", e)))?;

        let form = multipart::Form::new()
            .part("image", part)
            .text("latitude", coords.latitude.to_string())
            .text("longitude", coords.longitude.to_string());

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::AnalysisServiceError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::AnalysisServiceError(format!(
                "Analyze API error {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::AnalysisServiceError(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PestRiskLevel;

    #[test]
    fn test_full_response() {
        let json = r#"{
            "disease": "Tomato___Late_blight",
            "confidence": 93.57,
            "weather": {"temp": 27, "humidity": 88, "conditions": "mist", "location": "Ooty"},
            "pestRisk": {"level": "Medium", "color": "yellow", "reason": "ignored"},
            "llmAnalysis": {
                "description": "A water mould.",
                "causes": "Cool nights.",
                "treatment": "Copper spray.",
                "prevention": "Resistant varieties.",
                "tips": "Remove debris."
            }
        }"#;

        let response: AnalyzeResponse = serde_json::from_str(json).unwrap();
        let result = response.into_result("Tamil Nadu", LlmAnalysis::not_configured());

        assert_eq!(result.disease, "Tomato___Late_blight");
        assert_eq!(result.confidence, 94);
        assert_eq!(result.weather.location, "Ooty");
        assert_eq!(result.weather.description, "mist");
        assert_eq!(result.weather.rainfall_mm, Decimal::ZERO);
        // Recomputed locally: humidity 88 with 27°C is the fungal band
        assert_eq!(result.pest_risk.level, PestRiskLevel::High);
        assert_eq!(result.llm_analysis.treatment, "Copper spray.");
    }

    #[test]
    fn test_sparse_response_defaults() {
        let json = r#"{"disease": "Rice___Healthy", "confidence": 61.2}"#;

        let response: AnalyzeResponse = serde_json::from_str(json).unwrap();
        let result = response.into_result("Tamil Nadu", LlmAnalysis::not_configured());

        assert_eq!(result.confidence, 61);
        assert_eq!(result.weather.temperature_celsius, Decimal::ZERO);
        assert_eq!(result.weather.humidity_percent, Decimal::ZERO);
        assert_eq!(result.weather.location, "Tamil Nadu");
        assert_eq!(result.weather.description, "N/A");
        assert_eq!(result.pest_risk.level, PestRiskLevel::Low);
        assert_eq!(result.llm_analysis.description, "LLM not configured.");
    }

    #[test]
    fn test_confidence_is_clamped() {
        let json = r#"{"disease": "X", "confidence": 180.0, "weather": {"location": ""}}"#;

        let response: AnalyzeResponse = serde_json::from_str(json).unwrap();
        let result = response.into_result("Kerala", LlmAnalysis::default());

        assert_eq!(result.confidence, 100);
        assert_eq!(result.weather.location, "Kerala");
    }

    #[test]
    fn test_reading_just_above_threshold_is_kept() {
        let json = r#"{"disease": "Tomato___Early_blight", "confidence": 80,
                       "weather": {"temp": 30, "humidity": 80.004}}"#;

        let response: AnalyzeResponse = serde_json::from_str(json).unwrap();
        let result = response.into_result("Tamil Nadu", LlmAnalysis::not_configured());

        assert_eq!(result.weather.humidity_percent, Decimal::new(80004, 3));
        assert_eq!(result.pest_risk.level, PestRiskLevel::High);
    }
}
