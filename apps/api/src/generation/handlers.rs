//! Axum route handlers for the AI API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::SequenceRequest;
use crate::generation::tone::ToneConfig;
use crate::models::sequence::GenerationResult;
use crate::state::AppState;

/// Used when `sequence_length` is missing or zero.
pub const DEFAULT_SEQUENCE_LENGTH: usize = 3;

const MISSING_FIELDS_MESSAGE: &str = "prospect_url and company_context required";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateSequenceRequest {
    pub prospect_url: Option<String>,
    pub company_context: Option<String>,
    pub tov_config: Option<ToneConfig>,
    pub sequence_length: Option<usize>,
}

/// Success envelope shared by all AI endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub configured: bool,
    pub status: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/ai/status
///
/// Reports whether a usable provider credential is configured. No network call.
pub async fn handle_status(State(state): State<AppState>) -> Json<ApiResponse<StatusResponse>> {
    let configured = state.generator.is_configured();
    ApiResponse::ok(StatusResponse {
        configured,
        status: if configured { "ready" } else { "not_configured" },
    })
}

/// POST /api/ai/generate-sequence
///
/// Full pipeline: fetch profile → extract → tone → prompt → provider → resolve.
/// Always returns a complete result unless the request itself is invalid.
pub async fn handle_generate_sequence(
    State(state): State<AppState>,
    payload: Result<Json<GenerateSequenceRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<GenerationResult>>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let request = validate_request(request)?;

    let span = info_span!("generate_sequence", request_id = %Uuid::new_v4());
    let generator = state.generator.clone();

    // Run on its own task so a panic inside the pipeline maps to a 500.
    let result = tokio::spawn(
        async move { generator.generate_sequence(request).await }.instrument(span),
    )
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("generation task failed: {e}")))?;

    Ok(ApiResponse::ok(result))
}

fn validate_request(request: GenerateSequenceRequest) -> Result<SequenceRequest, AppError> {
    let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let (Some(prospect_url), Some(company_context)) = (
        non_blank(request.prospect_url),
        non_blank(request.company_context),
    ) else {
        return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    };

    Ok(SequenceRequest {
        prospect_url,
        company_context,
        tone: request.tov_config,
        sequence_length: request
            .sequence_length
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_SEQUENCE_LENGTH),
    })
}
