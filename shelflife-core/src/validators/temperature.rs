//! Storage temperature validator
//!
//! Rejects readings the rate law cannot use:
//! - NaN and infinities
//! - Anything at or below absolute zero (the exponent divides by Kelvin)
//! - Anything outside the configured limits

use crate::{
    constants::physics::ABSOLUTE_ZERO_CELSIUS,
    errors::{ShelfLifeError, ShelfLifeResult},
    traits::{RangePolicy, Validatable, Validator, ValidatorConstraints},
};

use super::utils;

/// Temperature validator for Celsius readings
#[derive(Debug, Clone)]
pub struct TemperatureValidator {
    /// Minimum valid temperature in Celsius
    min_celsius: f64,

    /// Maximum valid temperature in Celsius
    max_celsius: f64,
}

impl Default for TemperatureValidator {
    fn default() -> Self {
        Self {
            // Only physics limits the general-purpose query
            min_celsius: ABSOLUTE_ZERO_CELSIUS,
            max_celsius: f64::MAX,
        }
    }
}

impl TemperatureValidator {
    /// Create validator with custom limits
    pub fn new_with_limits(min: f64, max: f64) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };

        Self {
            min_celsius: min.max(ABSOLUTE_ZERO_CELSIUS),
            max_celsius: max,
        }
    }

    /// Validator for cold-chain monitoring (deep freeze to hot truck)
    pub fn cold_chain() -> Self {
        Self {
            min_celsius: -30.0,
            max_celsius: 50.0,
        }
    }
}

impl Validator for TemperatureValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ShelfLifeResult<f64> {
        if !value.is_valid() {
            return Err(ShelfLifeError::InvalidInput {
                reason: "temperature is not a finite number",
            });
        }

        if value <= ABSOLUTE_ZERO_CELSIUS {
            return Err(ShelfLifeError::InvalidInput {
                reason: "temperature at or below absolute zero",
            });
        }

        utils::check_range(
            value,
            self.min_celsius,
            self.max_celsius,
            "temperature outside accepted range",
        )
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: self.min_celsius,
            max_value: self.max_celsius,
            policy: RangePolicy::Reject,
        }
    }
}
