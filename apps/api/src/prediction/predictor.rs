//! Temporal skill predictor.
//!
//! Each training row becomes (months since start, TF-IDF vector of its skill
//! text). A prediction for a future month averages the vectors of the `k`
//! rows closest in time and decodes the result back into its heaviest terms.

use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::skill::SkillRow;
use crate::prediction::vectorizer::TfIdfVectorizer;
use crate::prediction::PredictionError;
use crate::trends::dates::parse_release_date;

/// Stand-in text for rows with a missing or blank skill.
pub const NO_PASSIVE_SKILL: &str = "No Passive Skill";
const UNKNOWN_SKILL: &str = "Unknown skill";

#[derive(Debug, Clone, Copy)]
pub struct PredictorSettings {
    pub max_features: usize,
    pub neighbors: usize,
    pub max_terms: usize,
}

#[derive(Debug, Clone)]
struct TrainingExample {
    months_since_start: i32,
    vector: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedTerm {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedSkill {
    pub year: i32,
    pub month: u32,
    pub months_since_start: i32,
    pub neighbors_used: usize,
    pub terms: Vec<PredictedTerm>,
    /// Terms joined by spaces, or "Unknown skill" when nothing decodes.
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SkillPredictor {
    settings: PredictorSettings,
    vectorizer: TfIdfVectorizer,
    examples: Vec<TrainingExample>,
    min_year: i32,
    dropped: usize,
}

fn skill_text(row: &SkillRow) -> &str {
    match row.passive_skill.as_str() {
        Some(s) if !s.trim().is_empty() => s,
        _ => NO_PASSIVE_SKILL,
    }
}

impl SkillPredictor {
    /// Fits the vectorizer and the time index. Rows without a usable date are
    /// skipped and counted.
    pub fn fit(
        rows: &[SkillRow],
        date_format: &str,
        settings: PredictorSettings,
    ) -> Result<Self, PredictionError> {
        let mut dated = Vec::with_capacity(rows.len());
        let mut dropped = 0;
        for row in rows {
            match parse_release_date(row.release_date_text(), date_format) {
                Some(date) => dated.push((date, skill_text(row))),
                None => dropped += 1,
            }
        }

        let min_year = dated
            .iter()
            .map(|(date, _)| date.year())
            .min()
            .ok_or(PredictionError::EmptyTrainingSet)?;

        let corpus: Vec<&str> = dated.iter().map(|&(_, text)| text).collect();
        let mut vectorizer = TfIdfVectorizer::new(settings.max_features);
        vectorizer.fit(&corpus);

        let examples = dated
            .iter()
            .map(|&(date, text)| TrainingExample {
                months_since_start: months_since_start(min_year, date.year(), date.month()),
                vector: vectorizer.transform(text),
            })
            .collect::<Vec<_>>();

        info!(
            examples = examples.len(),
            dropped,
            vocabulary = vectorizer.dimension(),
            "Fitted skill predictor"
        );

        Ok(Self {
            settings,
            vectorizer,
            examples,
            min_year,
            dropped,
        })
    }

    pub fn rows_used(&self) -> usize {
        self.examples.len()
    }

    pub fn rows_dropped(&self) -> usize {
        self.dropped
    }

    pub fn predict(&self, year: i32, month: u32) -> Result<PredictedSkill, PredictionError> {
        if !(1..=12).contains(&month) {
            return Err(PredictionError::InvalidMonth(month));
        }
        if self.examples.is_empty() {
            return Err(PredictionError::EmptyTrainingSet);
        }

        let target = months_since_start(self.min_year, year, month);

        // Stable sort keeps earlier rows first among equal distances.
        let mut order: Vec<usize> = (0..self.examples.len()).collect();
        order.sort_by_key(|&i| {
            (i64::from(self.examples[i].months_since_start) - i64::from(target)).unsigned_abs()
        });
        order.truncate(self.settings.neighbors);

        let mut mean = vec![0.0; self.vectorizer.dimension()];
        for &i in &order {
            for (acc, value) in mean.iter_mut().zip(&self.examples[i].vector) {
                *acc += value;
            }
        }
        let k = order.len() as f64;
        for acc in &mut mean {
            *acc /= k;
        }

        let terms: Vec<PredictedTerm> = self
            .vectorizer
            .inverse_transform(&mean, self.settings.max_terms)
            .into_iter()
            .map(|(term, weight)| PredictedTerm { term, weight })
            .collect();
        let text = if terms.is_empty() {
            UNKNOWN_SKILL.to_string()
        } else {
            terms
                .iter()
                .map(|t| t.term.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        };

        debug!(year, month, target, neighbors = order.len(), "Predicted passive skill");

        Ok(PredictedSkill {
            year,
            month,
            months_since_start: target,
            neighbors_used: order.len(),
            terms,
            text,
        })
    }
}

/// `(year - min_year) * 12 + month`, counted from the first release year.
pub fn months_since_start(min_year: i32, year: i32, month: u32) -> i32 {
    year.saturating_sub(min_year)
        .saturating_mul(12)
        .saturating_add(month as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::dates::DEFAULT_RELEASE_DATE_FORMAT;

    fn settings(neighbors: usize) -> PredictorSettings {
        PredictorSettings {
            max_features: 100,
            neighbors,
            max_terms: 12,
        }
    }

    fn rows() -> Vec<SkillRow> {
        vec![
            SkillRow::new("Jan 10, 2020", "DEF +30% guard"),
            SkillRow::new("Feb 10, 2020", "DEF +40% guard"),
            SkillRow::new("Jan 10, 2024", "ATK +150% rampage"),
            SkillRow::new("Mar 10, 2024", "ATK +200% rampage"),
        ]
    }

    #[test]
    fn test_months_since_start() {
        assert_eq!(months_since_start(2020, 2020, 1), 1);
        assert_eq!(months_since_start(2020, 2025, 5), 65);
    }

    #[test]
    fn test_prediction_follows_nearest_rows() {
        let p = SkillPredictor::fit(&rows(), DEFAULT_RELEASE_DATE_FORMAT, settings(2)).unwrap();
        let late = p.predict(2025, 5).unwrap();
        assert!(late.text.contains("rampage"));
        assert!(!late.text.contains("guard"));

        let early = p.predict(2020, 1).unwrap();
        assert!(early.text.contains("guard"));
        assert!(!early.text.contains("rampage"));
        assert_eq!(early.neighbors_used, 2);
    }

    #[test]
    fn test_neighbors_capped_by_training_size() {
        let p = SkillPredictor::fit(&rows(), DEFAULT_RELEASE_DATE_FORMAT, settings(50)).unwrap();
        assert_eq!(p.predict(2022, 6).unwrap().neighbors_used, 4);
    }

    #[test]
    fn test_bad_dates_are_dropped() {
        let mut data = rows();
        data.push(SkillRow::new("someday", "ATK +1%"));
        let p = SkillPredictor::fit(&data, DEFAULT_RELEASE_DATE_FORMAT, settings(2)).unwrap();
        assert_eq!(p.rows_used(), 4);
        assert_eq!(p.rows_dropped(), 1);
    }

    #[test]
    fn test_missing_skill_uses_placeholder() {
        let data = vec![SkillRow {
            release_date: serde_json::json!("Jan 01, 2021"),
            passive_skill: serde_json::json!("   "),
        }];
        let p = SkillPredictor::fit(&data, DEFAULT_RELEASE_DATE_FORMAT, settings(1)).unwrap();
        let out = p.predict(2021, 2).unwrap();
        let terms: Vec<_> = out.terms.iter().map(|t| t.term.as_str()).collect();
        assert!(terms.contains(&"passive"));
        assert!(terms.contains(&"skill"));
    }

    #[test]
    fn test_empty_training_set() {
        let data = vec![SkillRow::new("bad", "ATK +1%")];
        let err = SkillPredictor::fit(&data, DEFAULT_RELEASE_DATE_FORMAT, settings(1)).unwrap_err();
        assert!(matches!(err, PredictionError::EmptyTrainingSet));
    }

    #[test]
    fn test_invalid_month() {
        let p = SkillPredictor::fit(&rows(), DEFAULT_RELEASE_DATE_FORMAT, settings(1)).unwrap();
        assert!(matches!(p.predict(2025, 13), Err(PredictionError::InvalidMonth(13))));
        assert!(matches!(p.predict(2025, 0), Err(PredictionError::InvalidMonth(0))));
    }
}
