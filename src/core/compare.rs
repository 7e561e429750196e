//! Trend comparison - yield series for several municipalities side by side.
//!
//! The selection size is bounded by `maxCompareMunicipalities`; selections larger than
//! `performanceThreshold` are allowed but flagged. With `enableSmoothingByDefault` each
//! interior point becomes the mean of itself and its two neighbours.

use crate::{
    errors::{Error, Result},
    models::AdminSettings,
};
use serde::Serialize;
use std::collections::HashSet;

use super::municipality::EntityStore;

/// One municipality's line on the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Municipality the series belongs to
    pub municipality_id: String,
    /// Legend label
    pub display_name: String,
    /// Line color
    pub color: String,
    /// X axis, ascending
    pub years: Vec<i32>,
    /// Yields aligned with `years`, smoothed when `Comparison::smoothed` is set
    pub values: Vec<f64>,
}

/// Result of [`compare`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// One series per requested id, in request order
    pub series: Vec<Series>,
    /// More municipalities than `performanceThreshold` were selected
    pub performance_warning: bool,
    /// Values were smoothed
    pub smoothed: bool,
}

/// Three-point moving average over interior points; endpoints are kept.
/// Series of two or fewer points are returned unchanged.
#[must_use]
pub fn smooth(values: &[f64]) -> Vec<f64> {
    if values.len() <= 2 {
        return values.to_vec();
    }
    let last = values.len() - 1;
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if i == 0 || i == last {
                v
            } else {
                (values[i - 1] + v + values[i + 1]) / 3.0
            }
        })
        .collect()
}

/// Builds the comparison for `ids`.
///
/// # Errors
/// `Validation` for an empty, oversized, or repeated selection; `NotFound` for an id outside
/// the active set.
pub fn compare(ids: &[String], entities: &EntityStore, settings: &AdminSettings) -> Result<Comparison> {
    if ids.is_empty() {
        return Err(Error::validation("municipalities", "select at least one"));
    }
    let limit = usize::try_from(settings.max_compare_municipalities).unwrap_or(usize::MAX);
    if ids.len() > limit {
        return Err(Error::validation(
            "municipalities",
            format!("at most {limit} can be compared, got {}", ids.len()),
        ));
    }

    let mut seen = HashSet::new();
    let mut series = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(Error::validation(
                "municipalities",
                format!("'{id}' selected twice"),
            ));
        }
        let municipality = entities
            .get(id)
            .ok_or_else(|| Error::not_found("Municipality", id))?;

        let records = entities
            .yield_data_for(id)
            .map(|d| d.historical_data.as_slice())
            .unwrap_or_default();
        let raw: Vec<f64> = records.iter().map(|r| r.yield_value).collect();
        let values = if settings.enable_smoothing_by_default {
            smooth(&raw)
        } else {
            raw
        };

        series.push(Series {
            municipality_id: municipality.id.clone(),
            display_name: municipality.display_name.clone(),
            color: municipality.color.clone(),
            years: records.iter().map(|r| r.year).collect(),
            values,
        });
    }

    let threshold = usize::try_from(settings.performance_threshold).unwrap_or(usize::MAX);
    Ok(Comparison {
        series,
        performance_warning: ids.len() > threshold,
        smoothed: settings.enable_smoothing_by_default,
    })
}
