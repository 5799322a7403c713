//! Weather-driven pest and disease risk

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::weather::WeatherSnapshot;

/// Qualitative pest/disease pressure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PestRiskLevel {
    Low,
    Moderate,
    High,
}

impl PestRiskLevel {
    /// Color tag used by clients to render the badge
    pub fn color(&self) -> &'static str {
        match self {
            PestRiskLevel::Low => "green",
            PestRiskLevel::Moderate => "yellow",
            PestRiskLevel::High => "red",
        }
    }
}

impl std::fmt::Display for PestRiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PestRiskLevel::Low => write!(f, "Low"),
            PestRiskLevel::Moderate => write!(f, "Moderate"),
            PestRiskLevel::High => write!(f, "High"),
        }
    }
}

/// Which rule produced a verdict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PestRiskReason {
    FungalConditions,
    BacterialConditions,
    ModerateConditions,
    FavorableConditions,
}

impl PestRiskReason {
    pub fn message(&self) -> &'static str {
        match self {
            PestRiskReason::FungalConditions => {
                "High fungal disease risk. Monitor crops closely and apply preventive treatments."
            }
            PestRiskReason::BacterialConditions => {
                "High risk of bacterial infections due to rain and humidity. Ensure proper drainage."
            }
            PestRiskReason::ModerateConditions => {
                "Moderate disease risk. Monitor your crops and maintain field hygiene."
            }
            PestRiskReason::FavorableConditions => {
                "Low disease risk. Good conditions for healthy crop growth."
            }
        }
    }
}

/// Classification outcome shown next to a diagnosis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PestRiskVerdict {
    pub level: PestRiskLevel,
    pub color: String,
    pub reason: PestRiskReason,
    pub message: String,
}

impl PestRiskVerdict {
    fn from_rule(level: PestRiskLevel, reason: PestRiskReason) -> Self {
        Self {
            level,
            color: level.color().to_string(),
            reason,
            message: reason.message().to_string(),
        }
    }
}

/// Classify pest risk from current weather.
///
/// Rules are evaluated in order and the first match wins. They overlap (a
/// snapshot can satisfy both High rules), so the order is part of the contract.
/// All comparisons are strict; a reading exactly on a threshold falls through
/// to the next rule.
pub fn classify_pest_risk(weather: &WeatherSnapshot) -> PestRiskVerdict {
    let temp = weather.temperature_celsius;
    let humidity = weather.humidity_percent;
    let rainfall = weather.rainfall_mm;

    if humidity > Decimal::from(80) && temp > Decimal::from(25) && temp < Decimal::from(35) {
        return PestRiskVerdict::from_rule(PestRiskLevel::High, PestRiskReason::FungalConditions);
    }

    if humidity > Decimal::from(85) && rainfall > Decimal::from(5) {
        return PestRiskVerdict::from_rule(
            PestRiskLevel::High,
            PestRiskReason::BacterialConditions,
        );
    }

    if humidity > Decimal::from(60) && temp > Decimal::from(20) {
        return PestRiskVerdict::from_rule(
            PestRiskLevel::Moderate,
            PestRiskReason::ModerateConditions,
        );
    }

    PestRiskVerdict::from_rule(PestRiskLevel::Low, PestRiskReason::FavorableConditions)
}
