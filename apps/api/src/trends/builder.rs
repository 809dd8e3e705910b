//! Trend Builder: turns dated skill rows into per-date buff statistics.
//!
//! Algorithm:
//! 1. Extract a `BuffRecord` for every row.
//! 2. Normalize the release date; rows without a usable date are dropped and counted.
//! 3. Sort the remaining rows by date (stable).
//! 4. Group by date: per-cell mean and max, plus the row count.
//! 5. Peaks: per-cell maximum over all retained rows with the earliest date reaching it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::extraction::{BuffCell, BuffExtractor, BuffRecord, UnitScale};
use crate::models::skill::SkillRow;
use crate::trends::dates::parse_release_date;

/// A row that survived date normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedBuffRecord {
    pub date: NaiveDate,
    pub record: BuffRecord,
}

/// Rows ready for grouping, in date order.
#[derive(Debug, Clone, Default)]
pub struct PreparedRows {
    pub rows: Vec<DatedBuffRecord>,
    pub dropped: usize,
}

/// Statistics for a single release date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: usize,
    pub mean: BuffRecord,
    pub max: BuffRecord,
}

/// Largest value a cell ever reached, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellPeak {
    pub cell: BuffCell,
    pub value: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub unit_scale: UnitScale,
    pub rows_received: usize,
    pub rows_used: usize,
    pub rows_dropped: usize,
    pub points: Vec<TrendPoint>,
    pub peaks: Vec<CellPeak>,
}

pub fn prepare_rows(rows: &[SkillRow], extractor: &BuffExtractor<'_>, date_format: &str) -> PreparedRows {
    let mut prepared = PreparedRows::default();

    for row in rows {
        let record = extractor.extract(row.description());
        match parse_release_date(row.release_date_text(), date_format) {
            Some(date) => prepared.rows.push(DatedBuffRecord { date, record }),
            None => prepared.dropped += 1,
        }
    }

    prepared.rows.sort_by_key(|r| r.date);
    prepared
}

/// Groups prepared rows by date. Dates without rows never appear.
pub fn group_by_date(rows: &[DatedBuffRecord]) -> Vec<TrendPoint> {
    struct Bucket {
        count: usize,
        sum: BuffRecord,
        max: BuffRecord,
    }

    let mut buckets: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();
    for row in rows {
        let bucket = buckets.entry(row.date).or_insert(Bucket {
            count: 0,
            sum: BuffRecord::default(),
            max: row.record,
        });
        bucket.count += 1;
        for cell in BuffCell::ALL {
            let value = row.record.get(cell);
            *bucket.sum.get_mut(cell) += value;
            let max = bucket.max.get_mut(cell);
            if value > *max {
                *max = value;
            }
        }
    }

    buckets
        .into_iter()
        .map(|(date, bucket)| {
            let mut mean = BuffRecord::default();
            for cell in BuffCell::ALL {
                *mean.get_mut(cell) = bucket.sum.get(cell) / bucket.count as f64;
            }
            TrendPoint {
                date,
                count: bucket.count,
                mean,
                max: bucket.max,
            }
        })
        .collect()
}

/// Per-cell maximum over date-sorted rows; the earliest date wins ties.
pub fn find_peaks(rows: &[DatedBuffRecord]) -> Vec<CellPeak> {
    BuffCell::ALL
        .iter()
        .filter_map(|&cell| {
            rows.iter().fold(None, |best: Option<CellPeak>, row| {
                let value = row.record.get(cell);
                if best.as_ref().is_some_and(|peak| peak.value >= value) {
                    best
                } else {
                    Some(CellPeak {
                        cell,
                        value,
                        date: row.date,
                    })
                }
            })
        })
        .collect()
}

pub fn build_trend(rows: &[SkillRow], extractor: &BuffExtractor<'_>, date_format: &str) -> TrendReport {
    let prepared = prepare_rows(rows, extractor, date_format);

    if prepared.dropped > 0 {
        warn!(
            dropped = prepared.dropped,
            received = rows.len(),
            "Dropped rows with unparseable release dates"
        );
    }

    let points = group_by_date(&prepared.rows);
    let peaks = find_peaks(&prepared.rows);

    info!(
        rows_used = prepared.rows.len(),
        dates = points.len(),
        scale = %extractor.scale(),
        "Built buff trend"
    );

    TrendReport {
        unit_scale: extractor.scale(),
        rows_received: rows.len(),
        rows_used: prepared.rows.len(),
        rows_dropped: prepared.dropped,
        points,
        peaks,
    }
}
