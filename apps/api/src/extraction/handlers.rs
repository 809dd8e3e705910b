use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::aggregator::{BuffRecord, ClauseBreakdown};
use crate::extraction::{RawDescription, UnitScale};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Any JSON value; only strings carry skill text.
    #[serde(default)]
    pub description: Value,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub unit_scale: UnitScale,
    pub record: BuffRecord,
    pub clauses: Vec<ClauseBreakdown>,
}

#[derive(Debug, Deserialize)]
pub struct BatchExtractRequest {
    pub descriptions: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct BatchExtractResponse {
    pub unit_scale: UnitScale,
    pub records: Vec<BuffRecord>,
}

/// POST /api/v1/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let raw = RawDescription::from_json(&req.description);
    let record = state.extractor.extract(raw);
    let clauses = state.extractor.explain(raw);
    debug!(clauses = clauses.len(), ?record, "Extracted buff record");
    Ok(Json(ExtractResponse {
        unit_scale: state.extractor.scale(),
        record,
        clauses,
    }))
}

/// POST /api/v1/extract/batch
pub async fn handle_extract_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchExtractRequest>,
) -> Result<Json<BatchExtractResponse>, AppError> {
    if req.descriptions.is_empty() {
        return Err(AppError::Validation(
            "descriptions must contain at least one entry".to_string(),
        ));
    }
    if req.descriptions.len() > state.config.max_batch_rows {
        return Err(AppError::Validation(format!(
            "batch of {} exceeds the limit of {} descriptions",
            req.descriptions.len(),
            state.config.max_batch_rows
        )));
    }

    let raws: Vec<RawDescription<'_>> = req
        .descriptions
        .iter()
        .map(RawDescription::from_json)
        .collect();
    let records = state.extractor.extract_batch(&raws);
    Ok(Json(BatchExtractResponse {
        unit_scale: state.extractor.scale(),
        records,
    }))
}
