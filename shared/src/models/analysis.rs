//! Disease diagnosis results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pest_risk::{classify_pest_risk, PestRiskVerdict};
use super::weather::WeatherSnapshot;

/// Structured write-up of a detected disease
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmAnalysis {
    pub description: String,
    pub causes: String,
    pub treatment: String,
    pub prevention: String,
    pub tips: String,
}

/// Section headings the LLM is asked to answer with, in prompt order
const SECTION_HEADINGS: [(&str, Section); 5] = [
    ("DESCRIPTION:", Section::Description),
    ("HOW IT ATTACKED:", Section::Causes),
    ("TREATMENT:", Section::Treatment),
    ("PREVENTION:", Section::Prevention),
    ("CARE TIPS:", Section::Tips),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Causes,
    Treatment,
    Prevention,
    Tips,
}

impl LlmAnalysis {
    /// Placeholder used when no language model is configured
    pub fn not_configured() -> Self {
        Self {
            description: "LLM not configured.".to_string(),
            causes: "N/A".to_string(),
            treatment: "N/A".to_string(),
            prevention: "N/A".to_string(),
            tips: "N/A".to_string(),
        }
    }

    /// Placeholder carrying the upstream error in the description
    pub fn unavailable(error: &str) -> Self {
        Self {
            description: format!("LLM error: {}", error),
            ..Self::default()
        }
    }

    /// Parse a sectioned reply ("DESCRIPTION: ...", "TREATMENT: ...", ...).
    ///
    /// Lines without a heading continue the most recent section. Text before
    /// the first heading is dropped. Headings match case-insensitively.
    pub fn from_sectioned_text(text: &str) -> Self {
        let mut analysis = Self::default();
        let mut current: Option<Section> = None;

        for line in text.trim().lines() {
            let line = line.trim();
            let upper = line.to_uppercase();

            let heading = SECTION_HEADINGS
                .iter()
                .find(|(prefix, _)| upper.starts_with(prefix));

            if let Some((prefix, section)) = heading {
                current = Some(*section);
                *analysis.section_mut(*section) =
                    line.get(prefix.len()..).unwrap_or_default().trim().to_string();
                continue;
            }

            if let Some(section) = current {
                if line.is_empty() {
                    continue;
                }
                let slot = analysis.section_mut(section);
                if slot.is_empty() {
                    slot.push_str(line);
                } else {
                    slot.push(' ');
                    slot.push_str(line);
                }
            }
        }

        analysis
    }

    fn section_mut(&mut self, section: Section) -> &mut String {
        match section {
            Section::Description => &mut self.description,
            Section::Causes => &mut self.causes,
            Section::Treatment => &mut self.treatment,
            Section::Prevention => &mut self.prevention,
            Section::Tips => &mut self.tips,
        }
    }
}

/// A completed diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub disease: String,
    /// Whole-number percentage, 0-100
    pub confidence: u8,
    pub weather: WeatherSnapshot,
    pub pest_risk: PestRiskVerdict,
    pub llm_analysis: LlmAnalysis,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    /// Assemble a result, deriving pest risk from the weather snapshot
    pub fn new(
        disease: impl Into<String>,
        raw_confidence: f64,
        weather: WeatherSnapshot,
        llm_analysis: LlmAnalysis,
    ) -> Self {
        let pest_risk = classify_pest_risk(&weather);
        Self {
            disease: disease.into(),
            confidence: round_confidence(raw_confidence),
            weather,
            pest_risk,
            llm_analysis,
            timestamp: Utc::now(),
        }
    }

    /// Context line handed to the chat assistant
    pub fn recommendations(&self) -> String {
        format!(
            "Confidence: {}%. Weather: {}. Treatment: {} Prevention: {}",
            self.confidence,
            self.weather.summary(),
            self.llm_analysis.treatment,
            self.llm_analysis.prevention
        )
    }
}

/// Round a percentage to the nearest whole number and clamp it to 0-100.
///
/// Non-finite input yields 0.
pub fn round_confidence(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
