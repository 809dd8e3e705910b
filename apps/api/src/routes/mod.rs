pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::extraction::handlers as extraction;
use crate::prediction::handlers as prediction;
use crate::state::AppState;
use crate::trends::handlers as trends;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction API
        .route("/api/v1/extract", post(extraction::handle_extract))
        .route(
            "/api/v1/extract/batch",
            post(extraction::handle_extract_batch),
        )
        // Trend API
        .route("/api/v1/trends", post(trends::handle_trends))
        .route("/api/v1/trends/chart", post(trends::handle_trend_chart))
        // Prediction API
        .route("/api/v1/predict", post(prediction::handle_predict))
        .fallback(not_found)
        .with_state(state)
}
