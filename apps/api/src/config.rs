use anyhow::{anyhow, Context, Result};

use crate::extraction::UnitScale;
use crate::trends::dates::DEFAULT_RELEASE_DATE_FORMAT;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub unit_scale: UnitScale,
    pub release_date_format: String,
    pub prediction_max_features: usize,
    pub prediction_neighbors: usize,
    pub prediction_max_terms: usize,
    pub max_batch_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            unit_scale: UnitScale::Fraction,
            release_date_format: DEFAULT_RELEASE_DATE_FORMAT.to_string(),
            prediction_max_features: 100,
            prediction_neighbors: 5,
            prediction_max_terms: 12,
            max_batch_rows: 10_000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            unit_scale: match std::env::var("BUFF_UNIT_SCALE") {
                Ok(raw) => raw
                    .parse::<UnitScale>()
                    .map_err(|e| anyhow!(e))
                    .context("BUFF_UNIT_SCALE must be 'percent' or 'fraction'")?,
                Err(_) => defaults.unit_scale,
            },
            release_date_format: std::env::var("RELEASE_DATE_FORMAT")
                .unwrap_or(defaults.release_date_format),
            prediction_max_features: parse_positive(
                "PREDICTION_MAX_FEATURES",
                defaults.prediction_max_features,
            )?,
            prediction_neighbors: parse_positive(
                "PREDICTION_NEIGHBORS",
                defaults.prediction_neighbors,
            )?,
            prediction_max_terms: parse_positive(
                "PREDICTION_MAX_TERMS",
                defaults.prediction_max_terms,
            )?,
            max_batch_rows: parse_positive("MAX_BATCH_ROWS", defaults.max_batch_rows)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_positive(key: &str, default: usize) -> Result<usize> {
    let value = parse_env(key, default)?;
    if value == 0 {
        anyhow::bail!("Environment variable '{key}' must be greater than zero");
    }
    Ok(value)
}
