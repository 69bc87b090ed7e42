//! Regression metrics
//!
//! Error measures for held-out evaluation. Both inputs must be the same
//! non-zero length.

use serde::{Deserialize, Serialize};

use crate::{MLError, MLResult};

fn check_lengths(actual: &[f64], predicted: &[f64]) -> MLResult<()> {
    if actual.is_empty() {
        return Err(MLError::InsufficientData {
            required: 1,
            available: 0,
        });
    }
    if actual.len() != predicted.len() {
        return Err(MLError::InvalidConfig(format!(
            "{} actual values but {} predictions",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(())
}

/// Mean absolute error
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> MLResult<f64> {
    check_lengths(actual, predicted)?;
    let total: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).abs()).sum();
    Ok(total / actual.len() as f64)
}

/// Root mean squared error
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> MLResult<f64> {
    check_lengths(actual, predicted)?;
    let total: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p) * (a - p)).sum();
    Ok((total / actual.len() as f64).sqrt())
}

/// Coefficient of determination
///
/// `1 - SS_res / SS_tot`. When every actual value is identical SS_tot is
/// zero: a perfect fit scores 1.0 and anything else 0.0.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> MLResult<f64> {
    check_lengths(actual, predicted)?;
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean) * (a - mean)).sum();
    let ss_res: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p) * (a - p)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

/// All regression metrics for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean absolute error (days)
    pub mae: f64,
    /// Root mean squared error (days)
    pub rmse: f64,
    /// Coefficient of determination
    pub r2: f64,
}

impl RegressionMetrics {
    /// Evaluate predictions against actual values
    pub fn evaluate(actual: &[f64], predicted: &[f64]) -> MLResult<Self> {
        Ok(Self {
            mae: mean_absolute_error(actual, predicted)?,
            rmse: root_mean_squared_error(actual, predicted)?,
            r2: r2_score(actual, predicted)?,
        })
    }
}
