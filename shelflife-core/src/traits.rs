//! Core traits for input validators
//!
//! Every caller-supplied number passes through a validator before it
//! reaches a model. A validator either rejects the value or hands back the
//! value the model should use, which may be clamped.

use crate::errors::ShelfLifeResult;

/// How a validator treats values outside its range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePolicy {
    /// Out-of-range values are errors
    Reject,
    /// Out-of-range values are pulled to the nearest bound
    Clamp,
}

/// Accepted range for a validator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatorConstraints {
    /// Minimum accepted value
    pub min_value: f64,

    /// Maximum accepted value
    pub max_value: f64,

    /// What happens outside `[min_value, max_value]`
    pub policy: RangePolicy,
}

/// Input validator trait - one implementation per input kind
pub trait Validator {
    /// The type of value this validator handles
    type Value;

    /// Check a value and return the value to compute with
    fn validate(&self, value: Self::Value) -> ShelfLifeResult<Self::Value>;

    /// Get the accepted range for this validator
    fn constraints(&self) -> ValidatorConstraints;
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is usable at all (not NaN or infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
