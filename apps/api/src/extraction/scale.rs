use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit convention applied to every extracted magnitude.
///
/// One scale is fixed per extractor; records built under different scales
/// must never be aggregated together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitScale {
    /// `37%` is stored as `37.0`.
    Percent,
    /// `37%` is stored as `0.37`.
    #[default]
    Fraction,
}

impl UnitScale {
    /// Scales a raw percentage total into this convention.
    pub fn apply(self, magnitude: u64) -> f64 {
        let value = magnitude as f64;
        match self {
            UnitScale::Percent => value,
            UnitScale::Fraction => value / 100.0,
        }
    }

    /// Axis label for charts.
    pub fn axis_label(self) -> &'static str {
        match self {
            UnitScale::Percent => "Buff Percentage",
            UnitScale::Fraction => "Buff Fraction",
        }
    }
}

impl FromStr for UnitScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percent" => Ok(UnitScale::Percent),
            "fraction" => Ok(UnitScale::Fraction),
            other => Err(format!(
                "unknown unit scale '{other}' (expected 'percent' or 'fraction')"
            )),
        }
    }
}

impl fmt::Display for UnitScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitScale::Percent => f.write_str("percent"),
            UnitScale::Fraction => f.write_str("fraction"),
        }
    }
}
