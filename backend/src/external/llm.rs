//! Generative language API client
//!
//! Talks to a Gemini-style `generateContent` endpoint for two jobs: free-text
//! chat advice and structured disease write-ups.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{LlmAnalysis, WeatherSnapshot};

use crate::config::LlmConfig;
use crate::error::{AppError, AppResult};

const NO_RESPONSE: &str = "No response generated";

const EXPERT_PERSONA: &str = "You are an agricultural expert providing concise, practical advice.";

/// Client for the language model API
#[derive(Clone)]
pub struct LlmClient {
    api_endpoint: String,
    api_key: String,
    http_client: Client,
}

/// Context handed to the chat assistant alongside the farmer's question
#[derive(Debug, Clone, Default)]
pub struct ChatContext {
    pub message: String,
    pub disease: Option<String>,
    pub location: Option<String>,
    pub recommendations: Option<String>,
}

impl ChatContext {
    /// Full prompt: advisor instructions, current context, then the question
    pub fn prompt(&self) -> String {
        format!(
            "You are an expert agricultural advisor helping farmers with crop diseases.\n\
             \n\
             Current Context:\n\
             - Disease Detected: {}\n\
             - Farmer's Location: {}\n\
             - Base Recommendations: {}\n\
             \n\
             Provide practical, actionable advice in simple language. Focus on:\n\
             1. Local availability of treatments\n\
             2. Cost-effective solutions\n\
             3. Preventive measures\n\
             4. When to consult experts\n\
             \n\
             Keep responses concise (2-3 paragraphs max).\n\
             \n\
             Farmer's Question: {}",
            self.disease.as_deref().unwrap_or("Not specified"),
            self.location.as_deref().unwrap_or("India"),
            self.recommendations.as_deref().unwrap_or("None provided"),
            self.message
        )
    }
}

fn disease_prompt(disease: &str, weather: &WeatherSnapshot) -> String {
    format!(
        "Given plant disease: {}, current weather: {} in {}, provide a concise analysis in exactly this format:\n\n\
         DESCRIPTION: Brief 1-2 sentence description of the disease.\n\n\
         HOW IT ATTACKED: How the disease likely spread considering current weather conditions (1-2 sentences).\n\n\
         TREATMENT: Specific recommended treatments (2-3 bullet points).\n\n\
         PREVENTION: Prevention strategies (2-3 bullet points).\n\n\
         CARE TIPS: Ongoing care tips (2-3 bullet points).\n\n\
         Keep each section brief and actionable. Use simple language.",
        disease,
        weather.summary(),
        weather.location
    )
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
}

impl GenerationConfig {
    /// Conversational replies
    pub const CHAT: Self = Self {
        temperature: 0.7,
        max_output_tokens: 500,
        top_p: 0.8,
        top_k: 10,
    };

    /// Structured disease write-ups
    pub const DISEASE_DESCRIPTION: Self = Self {
        temperature: 0.3,
        max_output_tokens: 600,
        top_p: 0.8,
        top_k: 40,
    };
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}

impl LlmClient {
    /// Create a new LLM client from configuration
    pub fn new(config: &LlmConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("LLM HTTP client: {}", e)))?;

        Ok(Self {
            api_endpoint: config.api_endpoint.clone(),
            api_key: config.api_key.clone(),
            http_client,
        })
    }

    /// Answer a farmer's question in context
    pub async fn chat(&self, context: &ChatContext) -> AppResult<String> {
        let reply = self
            .generate(vec![context.prompt()], GenerationConfig::CHAT)
            .await?;
        Ok(reply.unwrap_or_else(|| NO_RESPONSE.to_string()))
    }

    /// Ask for a sectioned write-up of a detected disease
    pub async fn describe_disease(
        &self,
        disease: &str,
        weather: &WeatherSnapshot,
    ) -> AppResult<LlmAnalysis> {
        let text = self
            .generate(
                vec![EXPERT_PERSONA.to_string(), disease_prompt(disease, weather)],
                GenerationConfig::DISEASE_DESCRIPTION,
            )
            .await?
            .unwrap_or_default();

        Ok(LlmAnalysis::from_sectioned_text(&text))
    }

    async fn generate(
        &self,
        prompts: Vec<String>,
        generation_config: GenerationConfig,
    ) -> AppResult<Option<String>> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: prompts.into_iter().map(|text| Part { text }).collect(),
            }],
            generation_config,
        };

        let response = self
            .http_client
            .post(&self.api_endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::LlmServiceError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::LlmServiceError(format!(
                "API error: {}",
                response.status()
            )));
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::LlmServiceError(format!("Failed to parse response: {}", e)))?;

        Ok(data.first_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_prompt_defaults() {
        let context = ChatContext {
            message: "Is neem oil enough?".to_string(),
            ..ChatContext::default()
        };
        let prompt = context.prompt();

        assert!(prompt.contains("- Disease Detected: Not specified"));
        assert!(prompt.contains("- Farmer's Location: India"));
        assert!(prompt.contains("- Base Recommendations: None provided"));
        assert!(prompt.ends_with("Farmer's Question: Is neem oil enough?"));
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            generation_config: GenerationConfig::CHAT,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 500);
        assert_eq!(json["generationConfig"]["topK"], 10);
    }

    #[test]
    fn test_first_text() {
        let json = r#"{"candidates": [{"content": {"parts": [{"text": "Spray at dusk."}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text().as_deref(), Some("Spray at dusk."));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(empty.first_text(), None);

        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.first_text(), None);
    }

    #[test]
    fn test_disease_prompt_lists_sections() {
        let prompt = disease_prompt("Rice___Blast", &WeatherSnapshot::mock("Thanjavur"));
        for heading in [
            "DESCRIPTION:",
            "HOW IT ATTACKED:",
            "TREATMENT:",
            "PREVENTION:",
            "CARE TIPS:",
        ] {
            assert!(prompt.contains(heading));
        }
        assert!(prompt.contains("28°C, 75% humidity, partly cloudy in Thanjavur"));
    }
}
