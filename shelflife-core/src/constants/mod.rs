//! Constants for ShelfLife Core
//!
//! Every numeric value the models depend on is defined here with its
//! unit and origin, so tuning happens in one place.
//!
//! ## Organization
//!
//! - **Physics**: gas constant, temperature scale conversion, reference
//!   storage temperature
//! - **Storage**: decay-formula coefficients, humidity response, and the
//!   clamping ranges applied to caller input
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of magic numbers
//! 2. Include units in new constant names
//! 3. The decay coefficients are empirical; prefer overriding them through
//!    `DecayCoefficients` over editing them here

/// Physical constants used by the kinetic model.
pub mod physics;

/// Storage-condition constants: decay coefficients, humidity response, input ranges.
pub mod storage;

// Re-export commonly used constants for convenience
pub use physics::{
    ABSOLUTE_ZERO_CELSIUS, GAS_CONSTANT_J_PER_MOL_K, KELVIN_OFFSET, REFERENCE_TEMPERATURE_C,
};

pub use storage::{
    DEFAULT_HYBRID_ALPHA, DEFAULT_UNCERTAINTY_FRACTION, HUMIDITY_FACTOR_MAX_PCT,
    HUMIDITY_FACTOR_MIN_PCT, MAX_UNCERTAINTY_FRACTION, OPTIMAL_STORAGE_HUMIDITY_PCT,
};
