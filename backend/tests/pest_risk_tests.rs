//! Pest-risk classification tests
//!
//! Covers the rule table, its strict boundaries and the order in which
//! overlapping rules are tried.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{classify_pest_risk, PestRiskLevel, PestRiskReason, WeatherSnapshot};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn weather(temp: Decimal, humidity: Decimal, rainfall: Decimal) -> WeatherSnapshot {
    WeatherSnapshot::new(temp, humidity, rainfall, "Madurai", "test")
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_fungal_band() {
        let verdict = classify_pest_risk(&weather(dec("30"), dec("85"), dec("0")));
        assert_eq!(verdict.level, PestRiskLevel::High);
        assert_eq!(verdict.reason, PestRiskReason::FungalConditions);
        assert_eq!(verdict.color, "red");
        assert_eq!(
            verdict.message,
            "High fungal disease risk. Monitor crops closely and apply preventive treatments."
        );
    }

    #[test]
    fn test_humidity_80_is_not_fungal() {
        let verdict = classify_pest_risk(&weather(dec("30"), dec("80"), dec("0")));
        assert_ne!(verdict.reason, PestRiskReason::FungalConditions);
        assert_eq!(verdict.level, PestRiskLevel::Moderate);
    }

    #[test]
    fn test_bacterial_outside_temperature_band() {
        let verdict = classify_pest_risk(&weather(dec("18"), dec("90"), dec("12")));
        assert_eq!(verdict.level, PestRiskLevel::High);
        assert_eq!(verdict.reason, PestRiskReason::BacterialConditions);
        assert!(verdict.message.contains("Ensure proper drainage"));
    }

    #[test]
    fn test_low_risk() {
        let verdict = classify_pest_risk(&weather(dec("15"), dec("50"), dec("0")));
        assert_eq!(verdict.level, PestRiskLevel::Low);
        assert_eq!(verdict.reason, PestRiskReason::FavorableConditions);
        assert_eq!(verdict.color, "green");
    }

    #[test]
    fn test_moderate() {
        let verdict = classify_pest_risk(&weather(dec("22"), dec("65"), dec("1")));
        assert_eq!(verdict.level, PestRiskLevel::Moderate);
        assert_eq!(verdict.color, "yellow");
    }

    #[test]
    fn test_boundaries_fall_through() {
        // temp exactly 25 and 35 are outside the fungal band
        for temp in ["25", "35"] {
            let verdict = classify_pest_risk(&weather(dec(temp), dec("90"), dec("0")));
            assert_eq!(verdict.level, PestRiskLevel::Moderate, "temp {}", temp);
        }

        // humidity exactly 85 is not bacterial
        let verdict = classify_pest_risk(&weather(dec("10"), dec("85"), dec("20")));
        assert_eq!(verdict.level, PestRiskLevel::Low);

        // rainfall exactly 5 is not bacterial
        let verdict = classify_pest_risk(&weather(dec("10"), dec("95"), dec("5")));
        assert_eq!(verdict.level, PestRiskLevel::Low);

        // humidity exactly 60 / temp exactly 20 are not moderate
        let verdict = classify_pest_risk(&weather(dec("24"), dec("60"), dec("0")));
        assert_eq!(verdict.level, PestRiskLevel::Low);
        let verdict = classify_pest_risk(&weather(dec("20"), dec("70"), dec("0")));
        assert_eq!(verdict.level, PestRiskLevel::Low);
    }

    #[test]
    fn test_fungal_wins_over_bacterial() {
        // Both rule 1 and rule 2 hold; rule 1 is tried first
        let verdict = classify_pest_risk(&weather(dec("28"), dec("95"), dec("30")));
        assert_eq!(verdict.reason, PestRiskReason::FungalConditions);
    }

    #[test]
    fn test_missing_fields_classify_as_zero() {
        let snapshot: WeatherSnapshot = serde_json::from_str(r#"{"humidity": 90}"#).unwrap();
        let verdict = classify_pest_risk(&snapshot);
        assert_eq!(verdict.level, PestRiskLevel::Low);
    }

    #[test]
    fn test_fractional_readings_just_inside_band() {
        let verdict = classify_pest_risk(&weather(dec("25.01"), dec("80.01"), dec("0")));
        assert_eq!(verdict.level, PestRiskLevel::High);

        let verdict = classify_pest_risk(&weather(dec("34.99"), dec("80.5"), dec("0")));
        assert_eq!(verdict.reason, PestRiskReason::FungalConditions);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Temperature from -20.0 to 50.0 °C
    fn temp_strategy() -> impl Strategy<Value = Decimal> {
        (-200i64..=500i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Humidity from 0.0 to 100.0 %
    fn humidity_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=1000i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Rainfall from 0.0 to 50.0 mm
    fn rainfall_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=500i64).prop_map(|n| Decimal::new(n, 1))
    }

    fn weather_strategy() -> impl Strategy<Value = WeatherSnapshot> {
        (temp_strategy(), humidity_strategy(), rainfall_strategy())
            .prop_map(|(t, h, r)| weather(t, h, r))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Humidity > 80 with 25 < temp < 35 is always fungal High, whatever the rain
        #[test]
        fn prop_fungal_band_is_high(
            temp in (251i64..=349i64).prop_map(|n| Decimal::new(n, 1)),
            humidity in (801i64..=1000i64).prop_map(|n| Decimal::new(n, 1)),
            rainfall in rainfall_strategy(),
        ) {
            let verdict = classify_pest_risk(&weather(temp, humidity, rainfall));
            prop_assert_eq!(verdict.level, PestRiskLevel::High);
            prop_assert_eq!(verdict.reason, PestRiskReason::FungalConditions);
        }

        /// Humidity > 85 and rain > 5 outside the fungal band is bacterial High
        #[test]
        fn prop_bacterial_outside_band(
            temp in prop_oneof![
                (-200i64..=250i64).prop_map(|n| Decimal::new(n, 1)),
                (350i64..=500i64).prop_map(|n| Decimal::new(n, 1)),
            ],
            humidity in (851i64..=1000i64).prop_map(|n| Decimal::new(n, 1)),
            rainfall in (51i64..=500i64).prop_map(|n| Decimal::new(n, 1)),
        ) {
            let verdict = classify_pest_risk(&weather(temp, humidity, rainfall));
            prop_assert_eq!(verdict.level, PestRiskLevel::High);
            prop_assert_eq!(verdict.reason, PestRiskReason::BacterialConditions);
        }

        /// Humidity at or below 60 can never be Moderate or High
        #[test]
        fn prop_dry_air_is_low(
            temp in temp_strategy(),
            humidity in (0i64..=600i64).prop_map(|n| Decimal::new(n, 1)),
            rainfall in rainfall_strategy(),
        ) {
            let verdict = classify_pest_risk(&weather(temp, humidity, rainfall));
            prop_assert_eq!(verdict.level, PestRiskLevel::Low);
        }

        /// Classification is a pure function of the readings
        #[test]
        fn prop_classifier_is_idempotent(snapshot in weather_strategy()) {
            let first = classify_pest_risk(&snapshot);
            let second = classify_pest_risk(&snapshot.clone());
            prop_assert_eq!(first, second);
        }

        /// Location and description never influence the verdict
        #[test]
        fn prop_labels_do_not_matter(snapshot in weather_strategy(), name in "[a-zA-Z ]{0,20}") {
            let mut relabelled = snapshot.clone();
            relabelled.location = name.clone();
            relabelled.description = name;
            prop_assert_eq!(classify_pest_risk(&snapshot), classify_pest_risk(&relabelled));
        }

        /// Color and message always agree with the level and reason
        #[test]
        fn prop_verdict_is_consistent(snapshot in weather_strategy()) {
            let verdict = classify_pest_risk(&snapshot);
            prop_assert_eq!(verdict.color.as_str(), verdict.level.color());
            prop_assert_eq!(verdict.message.as_str(), verdict.reason.message());
        }
    }
}
