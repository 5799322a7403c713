//! WebAssembly module for CropGuard
//!
//! Provides client-side computation for:
//! - Pest-risk classification from weather readings
//! - Community board filtering
//! - Offline advisory replies
//! - Image checks before upload

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("CropGuard WASM module loaded"));
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Classify pest risk from raw readings; returns the verdict as JSON.
///
/// Non-finite readings count as 0.
#[wasm_bindgen]
pub fn assess_pest_risk(temp: f64, humidity: f64, rainfall: f64) -> Result<String, JsValue> {
    let weather = WeatherSnapshot::new(
        to_decimal(temp),
        to_decimal(humidity),
        to_decimal(rainfall),
        "",
        "",
    )
    .normalized();
    to_json(&classify_pest_risk(&weather))
}

/// Classify pest risk for a weather snapshot given as JSON
#[wasm_bindgen]
pub fn assess_weather(weather_json: &str) -> Result<String, JsValue> {
    let weather: WeatherSnapshot = serde_json::from_str(weather_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid weather JSON: {}", e)))?;
    to_json(&classify_pest_risk(&weather.normalized()))
}

/// Mock weather used while offline
#[wasm_bindgen]
pub fn mock_weather(location: &str) -> Result<String, JsValue> {
    to_json(&WeatherSnapshot::mock(location))
}

/// Filter a JSON array of posts by region and crop
#[wasm_bindgen]
pub fn filter_community_posts(
    posts_json: &str,
    region: &str,
    crop: &str,
) -> Result<String, JsValue> {
    let posts: Vec<CommunityPost> = serde_json::from_str(posts_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid posts JSON: {}", e)))?;
    to_json(&filter_posts(&posts, region, crop))
}

/// Canned reply for a question asked while offline
#[wasm_bindgen]
pub fn offline_reply(question: &str) -> String {
    offline_fallback(question).to_string()
}

/// Round a raw confidence score to a whole percentage
#[wasm_bindgen]
pub fn confidence_percent(raw: f64) -> u8 {
    round_confidence(raw)
}

/// Check an image data URL before upload.
///
/// Returns an empty string when the image is acceptable, otherwise the reason.
#[wasm_bindgen]
pub fn check_image(data_url: &str) -> String {
    match decode_image_data_url(data_url) {
        Ok(_) => String::new(),
        Err(reason) => reason.to_string(),
    }
}
