//! Uncertainty fraction validator
//!
//! The fraction widens absolute estimates into `[1 - f, 1 + f]` bounds.
//! It is clamped to `[0, 0.9]`; a value that is not a number falls back to
//! the default of 0.2 instead of failing the whole query.

use crate::{
    constants::storage::{DEFAULT_UNCERTAINTY_FRACTION, MAX_UNCERTAINTY_FRACTION},
    errors::ShelfLifeResult,
    traits::{RangePolicy, Validatable, Validator, ValidatorConstraints},
};

use super::utils;

/// Clamping validator for fractional uncertainty
#[derive(Debug, Clone)]
pub struct UncertaintyValidator {
    max_fraction: f64,
    fallback: f64,
}

impl Default for UncertaintyValidator {
    fn default() -> Self {
        Self {
            max_fraction: MAX_UNCERTAINTY_FRACTION,
            fallback: DEFAULT_UNCERTAINTY_FRACTION,
        }
    }
}

impl Validator for UncertaintyValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ShelfLifeResult<f64> {
        if !value.is_valid() {
            log_warn!("uncertainty fraction {} unusable, using {}", value, self.fallback);
            return Ok(self.fallback);
        }

        let clamped = utils::clamp_range(value, 0.0, self.max_fraction);
        if clamped != value {
            log_warn!("uncertainty fraction {} clamped to {}", value, clamped);
        }
        Ok(clamped)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: 0.0,
            max_value: self.max_fraction,
            policy: RangePolicy::Clamp,
        }
    }
}
