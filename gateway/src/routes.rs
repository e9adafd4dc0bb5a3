use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;
use soil_survey::FertilityReport;

/// Analysis request body. Both fields are checked by hand so a missing one
/// gets a specific error message instead of a bare deserialization failure.
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Serialize)]
pub struct AnalyzeSuccess {
    pub success: bool,
    #[serde(flatten)]
    pub report: FertilityReport,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "agro-gateway",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Run the fertility analysis for a coordinate
pub async fn analyze_soil(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeSuccess>, Json<ErrorResponse>> {
    let latitude = request.latitude.ok_or_else(|| missing_field("latitude"))?;
    let longitude = request.longitude.ok_or_else(|| missing_field("longitude"))?;

    match state.analyzer.analyze(latitude, longitude).await {
        Ok(report) => Ok(Json(AnalyzeSuccess {
            success: true,
            report,
        })),
        Err(e) => Err(Json(ErrorResponse {
            success: false,
            error: e.to_string(),
        })),
    }
}

fn missing_field(field: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        success: false,
        error: format!("{} is required", field),
    })
}
