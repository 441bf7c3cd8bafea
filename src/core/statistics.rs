//! Numeric reductions over risk scores
//!
//! Every function rejects an empty input with [`RiskError::Aggregation`] instead of
//! returning a sentinel, so an empty collection can never pass for a zero-risk one.
//! Callers substitute the Non-Identifiable default score before calling.

use crate::domain::errors::RiskError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Denominator convention for variance and standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    /// Divide by n
    #[default]
    Population,
    /// Divide by n - 1 (Bessel's correction)
    Sample,
}

impl CollectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionType::Population => "population",
            CollectionType::Sample => "sample",
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionType {
    type Err = RiskError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "population" => Ok(CollectionType::Population),
            "sample" => Ok(CollectionType::Sample),
            _ => Err(RiskError::Validation(format!(
                "Invalid collection type '{s}'. Must be one of: population, sample"
            ))),
        }
    }
}

fn ensure_non_empty(values: &[f64], operation: &str) -> Result<()> {
    if values.is_empty() {
        return Err(RiskError::Aggregation(format!(
            "Cannot compute {operation} of an empty sequence"
        )));
    }
    Ok(())
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

pub fn sum(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "sum")?;
    Ok(values.iter().sum())
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "mean")?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median, averaging the two middle values for even-length input
pub fn median(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "median")?;
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Smaller of the two middle values for even-length input
pub fn median_low(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "median_low")?;
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok(sorted[mid - 1])
    }
}

/// Larger of the two middle values for even-length input
pub fn median_high(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "median_high")?;
    let sorted = sorted(values);
    Ok(sorted[sorted.len() / 2])
}

/// Most frequent value; ties resolve to the first one encountered
pub fn mode(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "mode")?;

    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best = counts[0];
    for &(value, count) in &counts[1..] {
        if count > best.1 {
            best = (value, count);
        }
    }
    Ok(best.0)
}

/// Geometric mean; every value must be positive
pub fn geometric_mean(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "geometric_mean")?;
    if values.iter().any(|v| *v <= 0.0) {
        return Err(RiskError::Aggregation(
            "geometric_mean requires positive values".to_string(),
        ));
    }
    let log_mean = values.iter().map(|v| v.ln()).sum::<f64>() / values.len() as f64;
    Ok(log_mean.exp())
}

/// Harmonic mean; zero if any value is zero, error on negative values
pub fn harmonic_mean(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "harmonic_mean")?;
    if values.iter().any(|v| *v < 0.0) {
        return Err(RiskError::Aggregation(
            "harmonic_mean does not support negative values".to_string(),
        ));
    }
    if values.iter().any(|v| *v == 0.0) {
        return Ok(0.0);
    }
    let reciprocal_sum: f64 = values.iter().map(|v| 1.0 / v).sum();
    Ok(values.len() as f64 / reciprocal_sum)
}

fn squared_deviations(values: &[f64]) -> f64 {
    let mu = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mu).powi(2)).sum()
}

pub fn population_variance(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "population variance")?;
    Ok(squared_deviations(values) / values.len() as f64)
}

/// Sample variance; needs at least two values
pub fn sample_variance(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "sample variance")?;
    if values.len() < 2 {
        return Err(RiskError::Aggregation(
            "Sample variance requires at least two values".to_string(),
        ));
    }
    Ok(squared_deviations(values) / (values.len() - 1) as f64)
}

pub fn population_standard_deviation(values: &[f64]) -> Result<f64> {
    population_variance(values).map(f64::sqrt)
}

pub fn sample_standard_deviation(values: &[f64]) -> Result<f64> {
    sample_variance(values).map(f64::sqrt)
}

pub fn variance(values: &[f64], collection_type: CollectionType) -> Result<f64> {
    match collection_type {
        CollectionType::Population => population_variance(values),
        CollectionType::Sample => sample_variance(values),
    }
}

pub fn standard_deviation(values: &[f64], collection_type: CollectionType) -> Result<f64> {
    match collection_type {
        CollectionType::Population => population_standard_deviation(values),
        CollectionType::Sample => sample_standard_deviation(values),
    }
}

/// Variance with the collection type given as a string flag
///
/// The flag is validated before the values are inspected.
pub fn get_variance(values: &[f64], collection_type: &str) -> Result<f64> {
    let collection_type: CollectionType = collection_type.parse()?;
    variance(values, collection_type)
}

/// Standard deviation with the collection type given as a string flag
pub fn get_standard_deviation(values: &[f64], collection_type: &str) -> Result<f64> {
    let collection_type: CollectionType = collection_type.parse()?;
    standard_deviation(values, collection_type)
}

/// Collection-level statistics over per-item mean risk scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreSummary {
    pub mean: f64,
    pub mode: f64,
    pub median: f64,
    pub variance: f64,
    pub standard_deviation: f64,
}

impl RiskScoreSummary {
    pub fn from_scores(scores: &[f64], collection_type: CollectionType) -> Result<Self> {
        Ok(Self {
            mean: mean(scores)?,
            mode: mode(scores)?,
            median: median(scores)?,
            variance: variance(scores, collection_type)?,
            standard_deviation: standard_deviation(scores, collection_type)?,
        })
    }
}
