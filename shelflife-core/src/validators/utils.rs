//! Shared range helpers for the validators

use crate::errors::{ShelfLifeError, ShelfLifeResult};

/// Check that a value is within the inclusive range
pub fn check_range(value: f64, min: f64, max: f64, reason: &'static str) -> ShelfLifeResult<f64> {
    if value < min || value > max {
        Err(ShelfLifeError::InvalidInput { reason })
    } else {
        Ok(value)
    }
}

/// Pull a value into the inclusive range
pub fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
