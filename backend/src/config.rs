//! Configuration management for CropGuard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CROPGUARD_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Image analysis service
    pub analysis: AnalysisConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Generative language API configuration
    pub llm: LlmConfig,

    /// Community board settings
    pub community: CommunityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Base URL of the image analysis backend (POST {endpoint}/analyze)
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key; empty means mock weather is served
    pub api_key: String,

    /// Country code appended to city lookups
    pub country_code: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// generateContent endpoint of the language model
    pub api_endpoint: String,

    /// API key; empty means the chat assistant answers from canned replies
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommunityConfig {
    /// Passcode required to switch a session to the expert role
    pub expert_passcode: String,
}

impl WeatherConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl LlmConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROPGUARD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::builder_with_defaults(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROPGUARD_ prefix)
            .add_source(
                Environment::with_prefix("CROPGUARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Configuration made of code defaults only
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder_with_defaults("development")?
            .build()?
            .try_deserialize()
    }

    fn builder_with_defaults(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("analysis.endpoint", "http://localhost:5001")?
            .set_default("analysis.timeout_secs", 60)?
            .set_default(
                "weather.api_endpoint",
                "https://api.openweathermap.org/data/2.5/weather",
            )?
            .set_default("weather.api_key", "")?
            .set_default("weather.country_code", "IN")?
            .set_default("weather.timeout_secs", 10)?
            .set_default(
                "llm.api_endpoint",
                "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent",
            )?
            .set_default("llm.api_key", "")?
            .set_default("llm.timeout_secs", 30)?
            .set_default("community.expert_passcode", "EXPERT2025")
    }
}
