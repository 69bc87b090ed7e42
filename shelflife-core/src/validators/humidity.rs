//! Relative humidity validator
//!
//! Humidity is clamped, never rejected for range. A reading of 104 %RH
//! from a saturated capacitive sensor still means "very humid", and the
//! models only use humidity as a multiplier. NaN is still an error.

use crate::{
    constants::storage::{HUMIDITY_FACTOR_MAX_PCT, HUMIDITY_FACTOR_MIN_PCT},
    errors::{ShelfLifeError, ShelfLifeResult},
    traits::{RangePolicy, Validatable, Validator, ValidatorConstraints},
};

use super::utils;

/// Humidity validator for relative humidity percentage
#[derive(Debug, Clone)]
pub struct HumidityValidator {
    /// Lower clamp in %RH
    min_percent: f64,

    /// Upper clamp in %RH
    max_percent: f64,
}

impl Default for HumidityValidator {
    fn default() -> Self {
        Self {
            min_percent: 0.0,
            max_percent: 100.0,
        }
    }
}

impl HumidityValidator {
    /// Create validator with custom clamp limits
    pub fn new_with_limits(min: f64, max: f64) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        Self {
            min_percent: min,
            max_percent: max,
        }
    }

    /// Range the humidity factor is defined on (30-100 %RH)
    pub fn for_humidity_factor() -> Self {
        Self {
            min_percent: HUMIDITY_FACTOR_MIN_PCT,
            max_percent: HUMIDITY_FACTOR_MAX_PCT,
        }
    }
}

impl Validator for HumidityValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ShelfLifeResult<f64> {
        if !value.is_valid() {
            return Err(ShelfLifeError::InvalidInput {
                reason: "humidity is not a finite number",
            });
        }

        let clamped = utils::clamp_range(value, self.min_percent, self.max_percent);
        if clamped != value {
            log_warn!("humidity {}% clamped to {}%", value, clamped);
        }
        Ok(clamped)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: self.min_percent,
            max_value: self.max_percent,
            policy: RangePolicy::Clamp,
        }
    }
}
