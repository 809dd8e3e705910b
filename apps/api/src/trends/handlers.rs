use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::skill::SkillRow;
use crate::state::AppState;
use crate::trends::builder::{build_trend, TrendReport};
use crate::trends::chart::{build_chart, ChartSpec, TrendStatistic};

#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    pub rows: Vec<SkillRow>,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub stat: Option<String>,
}

fn check_row_count(rows: &[SkillRow], state: &AppState) -> Result<(), AppError> {
    if rows.len() > state.config.max_batch_rows {
        return Err(AppError::Validation(format!(
            "{} rows exceeds the limit of {}",
            rows.len(),
            state.config.max_batch_rows
        )));
    }
    Ok(())
}

/// POST /api/v1/trends
pub async fn handle_trends(
    State(state): State<AppState>,
    Json(req): Json<TrendRequest>,
) -> Result<Json<TrendReport>, AppError> {
    check_row_count(&req.rows, &state)?;
    Ok(Json(build_trend(
        &req.rows,
        &state.extractor,
        &state.config.release_date_format,
    )))
}

/// POST /api/v1/trends/chart?stat=mean|max
pub async fn handle_trend_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
    Json(req): Json<TrendRequest>,
) -> Result<Json<ChartSpec>, AppError> {
    let statistic = match query.stat.as_deref() {
        Some(raw) => raw.parse::<TrendStatistic>().map_err(AppError::Validation)?,
        None => TrendStatistic::default(),
    };
    check_row_count(&req.rows, &state)?;
    let report = build_trend(
        &req.rows,
        &state.extractor,
        &state.config.release_date_format,
    );
    Ok(Json(build_chart(&report, statistic)))
}
