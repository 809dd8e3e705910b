//! Renderer-neutral chart payload for buff trends.
//!
//! Any plotting front end that can draw a numeric series against an ordered
//! date axis with a legend can consume a `ChartSpec` as-is.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extraction::BuffCell;
use crate::trends::builder::TrendReport;

const CHART_TITLE: &str = "Trends of ATK and DEF Buffs Over Time";
const X_AXIS_LABEL: &str = "Release Date";

/// Which per-date statistic a chart plots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatistic {
    #[default]
    Mean,
    Max,
}

impl FromStr for TrendStatistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(TrendStatistic::Mean),
            "max" => Ok(TrendStatistic::Max),
            other => Err(format!("unknown statistic '{other}' (expected 'mean' or 'max')")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub cell: BuffCell,
    pub label: String,
    pub color: &'static str,
    pub marker: &'static str,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub statistic: TrendStatistic,
    pub series: Vec<ChartSeries>,
}

/// ATK in blues, DEF in reds; circles/crosses for base effects.
fn series_style(cell: BuffCell) -> (&'static str, &'static str) {
    match cell {
        BuffCell::AtkImmediate => ("blue", "o"),
        BuffCell::AtkConditional => ("steelblue", "^"),
        BuffCell::DefImmediate => ("red", "x"),
        BuffCell::DefConditional => ("salmon", "s"),
    }
}

pub fn build_chart(report: &TrendReport, statistic: TrendStatistic) -> ChartSpec {
    let series = BuffCell::ALL
        .iter()
        .map(|&cell| {
            let (color, marker) = series_style(cell);
            let points = report
                .points
                .iter()
                .map(|p| {
                    let record = match statistic {
                        TrendStatistic::Mean => &p.mean,
                        TrendStatistic::Max => &p.max,
                    };
                    ChartPoint {
                        date: p.date,
                        value: record.get(cell),
                    }
                })
                .collect();
            ChartSeries {
                cell,
                label: cell.label(),
                color,
                marker,
                points,
            }
        })
        .collect();

    ChartSpec {
        title: CHART_TITLE.to_string(),
        x_label: X_AXIS_LABEL.to_string(),
        y_label: report.unit_scale.axis_label().to_string(),
        statistic,
        series,
    }
}
