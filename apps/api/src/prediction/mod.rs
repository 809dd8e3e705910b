// Passive-skill prediction
// Implements: TF-IDF vectorization and a temporal nearest-neighbour regressor.

pub mod handlers;
pub mod predictor;
pub mod vectorizer;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("No rows with a usable release date to train on")]
    EmptyTrainingSet,

    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
}
