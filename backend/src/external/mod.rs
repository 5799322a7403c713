//! External API integrations

pub mod analysis;
pub mod llm;
pub mod weather;

pub use analysis::AnalysisClient;
pub use llm::{ChatContext, LlmClient};
pub use weather::WeatherClient;
