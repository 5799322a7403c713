//! Validation utilities for CropGuard
//!
//! Boundary checks applied to data arriving from clients and external
//! services before it reaches the session state.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rust_decimal::Decimal;

use crate::models::WeatherSnapshot;
use crate::types::{GpsCoordinates, ImagePayload};

/// Largest decoded image accepted for analysis (10 MiB)
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Image MIME types the analysis endpoint understands
pub const SUPPORTED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

// ============================================================================
// Location
// ============================================================================

/// Validate latitude/longitude ranges
pub fn validate_coordinates(coords: &GpsCoordinates) -> Result<(), &'static str> {
    if coords.latitude < Decimal::from(-90) || coords.latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if coords.longitude < Decimal::from(-180) || coords.longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a free-text location or city name
pub fn validate_location(location: &str) -> Result<(), &'static str> {
    let location = location.trim();
    if location.is_empty() {
        return Err("Location must not be empty");
    }
    if location.chars().count() > 100 {
        return Err("Location must be at most 100 characters");
    }
    Ok(())
}

// ============================================================================
// Weather
// ============================================================================

/// Validate weather readings are physically meaningful
pub fn validate_weather_readings(weather: &WeatherSnapshot) -> Result<(), &'static str> {
    if weather.humidity_percent < Decimal::ZERO || weather.humidity_percent > Decimal::ONE_HUNDRED
    {
        return Err("Humidity must be between 0 and 100%");
    }
    if weather.rainfall_mm < Decimal::ZERO {
        return Err("Rainfall cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Images
// ============================================================================

/// Decode a `data:image/...;base64,...` URL into raw bytes
pub fn decode_image_data_url(data_url: &str) -> Result<ImagePayload, &'static str> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or("Image must be a data URL")?;
    let (header, payload) = rest.split_once(',').ok_or("Malformed data URL")?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or("Image data must be base64 encoded")?
        .to_ascii_lowercase();

    if !SUPPORTED_IMAGE_TYPES.contains(&mime_type.as_str()) {
        return Err("Unsupported image type. Use JPEG, PNG or WebP");
    }

    // Cheap upper bound before decoding
    if payload.len() / 4 * 3 > MAX_IMAGE_BYTES + 3 {
        return Err("Image is larger than 10 MB");
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|_| "Image data is not valid base64")?;

    if bytes.is_empty() {
        return Err("Image is empty");
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err("Image is larger than 10 MB");
    }

    Ok(ImagePayload { mime_type, bytes })
}

/// Validate every image in a batch
pub fn validate_images(images: &[String]) -> Result<(), &'static str> {
    images
        .iter()
        .try_for_each(|image| decode_image_data_url(image).map(|_| ()))
}
