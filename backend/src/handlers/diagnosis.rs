//! HTTP handlers for crop diagnosis

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{validate_coordinates, AnalysisResult, GpsCoordinates};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentSession;
use crate::AppState;

/// Where the photographed crop is
#[derive(Debug, Deserialize)]
pub struct DiagnoseRequest {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisStatus {
    pub result: Option<AnalysisResult>,
    pub is_analyzing: bool,
    pub error: Option<String>,
}

/// Diagnose the first pending image
pub async fn run_diagnosis(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(input): Json<DiagnoseRequest>,
) -> AppResult<Json<AnalysisResult>> {
    let coords = GpsCoordinates::new(input.latitude, input.longitude);
    validate_coordinates(&coords).map_err(|e| AppError::Validation {
        field: "coordinates".to_string(),
        message: e.to_string(),
    })?;

    let result = state.diagnosis.diagnose(&current.handle, coords).await?;
    Ok(Json(result))
}

/// Current diagnosis, if any
pub async fn get_diagnosis(current: CurrentSession) -> Json<DiagnosisStatus> {
    let session = current.handle.lock().await;
    Json(DiagnosisStatus {
        result: session.results().cloned(),
        is_analyzing: session.is_analyzing(),
        error: session.analysis_error().map(str::to_string),
    })
}

/// Forget the current diagnosis; history is kept
pub async fn clear_diagnosis(current: CurrentSession) -> StatusCode {
    let mut session = current.handle.lock().await;
    session.clear_results();
    session.set_analysis_error(None);
    StatusCode::NO_CONTENT
}

/// Every completed diagnosis of the session, oldest first
pub async fn get_history(current: CurrentSession) -> Json<Vec<AnalysisResult>> {
    let session = current.handle.lock().await;
    Json(session.history().to_vec())
}
