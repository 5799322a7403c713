//! Crop disease diagnosis
//!
//! Runs the first session image through the analysis service, fills in a
//! disease write-up when the service did not provide one, and records the
//! outcome on the session.

use shared::{
    decode_image_data_url, AnalysisResult, AppSession, GpsCoordinates, LlmAnalysis, WeatherSnapshot,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::{AnalysisClient, LlmClient};
use crate::sessions::SessionHandle;

/// Message stored on the session when a diagnosis fails
pub const ANALYSIS_FAILED: &str = "Analysis failed. Please try again.";

#[derive(Clone)]
pub struct DiagnosisService {
    analysis: AnalysisClient,
    llm: Option<LlmClient>,
}

impl DiagnosisService {
    pub fn new(config: &Config) -> AppResult<Self> {
        let llm = if config.llm.is_configured() {
            Some(LlmClient::new(&config.llm)?)
        } else {
            None
        };

        Ok(Self {
            analysis: AnalysisClient::new(&config.analysis)?,
            llm,
        })
    }

    /// Diagnose the session's first image.
    ///
    /// The session lock is released while the remote calls are in flight; the
    /// analyzing flag keeps a second diagnosis from starting meanwhile. The
    /// remote work runs on its own task so the session is settled even when
    /// the caller stops waiting.
    pub async fn diagnose(
        &self,
        session: &SessionHandle,
        coords: GpsCoordinates,
    ) -> AppResult<AnalysisResult> {
        let (image, location) = {
            let mut session = session.lock().await;
            let image = session.begin_analysis()?;
            (image, session.user_location().to_string())
        };

        let service = self.clone();
        let handle = session.clone();
        let task = tokio::spawn(async move {
            let outcome = service.analyze(&image, &coords, &location).await;
            settle(&mut *handle.lock().await, outcome)
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                session.lock().await.fail_analysis(ANALYSIS_FAILED);
                Err(AppError::InternalError(anyhow::anyhow!(
                    "Diagnosis task aborted: {}",
                    e
                )))
            }
        }
    }

    async fn analyze(
        &self,
        image: &str,
        coords: &GpsCoordinates,
        location: &str,
    ) -> AppResult<AnalysisResult> {
        let payload =
            decode_image_data_url(image).map_err(|e| AppError::ImageRejected(e.to_string()))?;

        let response = self.analysis.analyze(payload, coords).await?;
        let needs_write_up = response.llm_analysis.is_none();

        let mut result = response.into_result(location, LlmAnalysis::not_configured());
        if needs_write_up {
            result.llm_analysis = self.describe(&result.disease, &result.weather).await;
        }

        Ok(result)
    }

    async fn describe(&self, disease: &str, weather: &WeatherSnapshot) -> LlmAnalysis {
        let Some(llm) = &self.llm else {
            return LlmAnalysis::not_configured();
        };

        match llm.describe_disease(disease, weather).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Disease write-up failed: {}", e);
                LlmAnalysis::unavailable(&e.to_string())
            }
        }
    }
}

/// Record the outcome of a finished analysis on the session
fn settle(
    session: &mut AppSession,
    outcome: AppResult<AnalysisResult>,
) -> AppResult<AnalysisResult> {
    match outcome {
        Ok(result) => {
            tracing::info!(
                disease = %result.disease,
                confidence = result.confidence,
                pest_risk = %result.pest_risk.level,
                "Diagnosis completed"
            );
            session.complete_analysis(result.clone());
            Ok(result)
        }
        Err(e) => {
            tracing::warn!("Diagnosis failed: {}", e);
            session.fail_analysis(ANALYSIS_FAILED);
            Err(e)
        }
    }
}
