//! Yield prediction - a three-year linear projection from the historical series.
//!
//! The projection is `max(0, recent + 3 × trend)`, where `recent` is the latest year's yield
//! and `trend` the least-squares slope per year. Municipalities without usable history fall
//! back to the mean of all datasets' `averageYield`.

use crate::{
    errors::{Error, Result},
    models::{MunicipalityYieldData, YieldRecord},
};
use serde::Serialize;

/// Years projected forward from the latest record.
const PROJECTION_YEARS: f64 = 3.0;
/// Yields at or above this are `High` (tons/ha).
const HIGH_THRESHOLD: f64 = 0.7;
/// Yields at or above this are `Medium` (tons/ha).
const MEDIUM_THRESHOLD: f64 = 0.4;
const MIN_CONFIDENCE: f64 = 85.0;
const MAX_CONFIDENCE: f64 = 95.0;

/// Coarse yield band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YieldLevel {
    /// ≥ 0.7 tons/ha
    High,
    /// 0.4 to 0.7 tons/ha
    Medium,
    /// < 0.4 tons/ha
    Low,
}

impl YieldLevel {
    /// Classifies a yield in tons per hectare.
    #[must_use]
    pub fn classify(yield_value: f64) -> Self {
        if yield_value >= HIGH_THRESHOLD {
            Self::High
        } else if yield_value >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Outcome of [`predict`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Municipality the prediction is for
    pub municipality_id: String,
    /// Projected yield in tons/ha, two decimals
    pub predicted_yield: f64,
    /// Confidence percentage, one decimal
    pub confidence: f64,
    /// Band of `predicted_yield`
    pub level: YieldLevel,
    /// `true` when the all-municipality average was used
    pub fallback: bool,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Least-squares slope of yield over year; 0 for fewer than two records.
#[must_use]
pub fn trend(records: &[YieldRecord]) -> f64 {
    if records.len() < 2 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)] // Series are a few dozen years at most
    let n = records.len() as f64;
    let mean_x = records.iter().map(|r| f64::from(r.year)).sum::<f64>() / n;
    let mean_y = records.iter().map(|r| r.yield_value).sum::<f64>() / n;

    let (num, den) = records.iter().fold((0.0, 0.0), |(num, den), r| {
        let dx = f64::from(r.year) - mean_x;
        (num + dx * (r.yield_value - mean_y), den + dx * dx)
    });

    if den == 0.0 { 0.0 } else { num / den }
}

/// Predicts the yield of `municipality_id` from `data`.
///
/// # Errors
/// `NotFound` when no dataset exists at all, so not even a fallback average is available.
pub fn predict(municipality_id: &str, data: &[MunicipalityYieldData]) -> Result<Prediction> {
    let series = data
        .iter()
        .find(|d| d.municipality_id == municipality_id)
        .filter(|d| !d.historical_data.is_empty());

    let Some(series) = series else {
        if data.is_empty() {
            return Err(Error::not_found("Yield data", municipality_id));
        }
        #[allow(clippy::cast_precision_loss)]
        let average = data.iter().map(|d| d.average_yield).sum::<f64>() / data.len() as f64;
        return Ok(Prediction {
            municipality_id: municipality_id.to_string(),
            predicted_yield: round_to(average, 2),
            confidence: MIN_CONFIDENCE,
            level: YieldLevel::classify(average),
            fallback: true,
        });
    };

    let slope = trend(&series.historical_data);
    let recent = series
        .historical_data
        .last()
        .map_or(0.0, |r| r.yield_value);
    let predicted = PROJECTION_YEARS.mul_add(slope, recent).max(0.0);
    let confidence = slope.abs().mul_add(100.0, MIN_CONFIDENCE).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

    Ok(Prediction {
        municipality_id: municipality_id.to_string(),
        predicted_yield: round_to(predicted, 2),
        confidence: round_to(confidence, 1),
        level: YieldLevel::classify(predicted),
        fallback: false,
    })
}
