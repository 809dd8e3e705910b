use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::skill::SkillRow;
use crate::prediction::predictor::{PredictedSkill, PredictorSettings, SkillPredictor};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub rows: Vec<SkillRow>,
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: PredictedSkill,
    pub rows_used: usize,
    pub rows_dropped: usize,
}

/// POST /api/v1/predict
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    if req.rows.len() > state.config.max_batch_rows {
        return Err(AppError::Validation(format!(
            "{} rows exceeds the limit of {}",
            req.rows.len(),
            state.config.max_batch_rows
        )));
    }

    let settings = PredictorSettings {
        max_features: state.config.prediction_max_features,
        neighbors: state.config.prediction_neighbors,
        max_terms: state.config.prediction_max_terms,
    };
    let predictor = SkillPredictor::fit(&req.rows, &state.config.release_date_format, settings)?;
    let prediction = predictor.predict(req.year, req.month)?;

    Ok(Json(PredictResponse {
        prediction,
        rows_used: predictor.rows_used(),
        rows_dropped: predictor.rows_dropped(),
    }))
}
