//! Storage-Condition Constants
//!
//! Empirical coefficients for the synthetic decay formula, the humidity
//! response used by the hybrid estimate, and the ranges caller input is
//! clamped into.

// ===== DECAY FORMULA =====

/// Temperature penalty per °C of deviation from the optimum, either side.
pub const DECAY_TEMP_LINEAR_PER_C: f64 = 0.07;

/// Extra temperature penalty per °C above the optimum.
///
/// Warm storage accelerates respiration far more than cold storage slows
/// it, so the excess term only applies above the optimum.
pub const DECAY_TEMP_EXCESS_PER_C: f64 = 0.18;

/// Humidity penalty per %RH of deviation from the optimum, either side.
pub const DECAY_HUMIDITY_LINEAR_PER_PCT: f64 = 0.04;

/// Extra humidity penalty per %RH above the optimum.
pub const DECAY_HUMIDITY_EXCESS_PER_PCT: f64 = 0.10;

/// Standard deviation of the label noise added by the decay formula (days).
pub const DECAY_NOISE_STD_DAYS: f64 = 0.75;

/// Shortest shelf life the decay formula reports (days).
pub const MIN_SHELF_LIFE_DAYS: u32 = 1;

// ===== HUMIDITY RESPONSE =====

/// Relative humidity at which the humidity factor peaks (%).
///
/// Most fresh produce is stored at 85-95 %RH.
pub const OPTIMAL_STORAGE_HUMIDITY_PCT: f64 = 90.0;

/// Scale of the humidity-factor exponent.
pub const HUMIDITY_FACTOR_SCALE: f64 = 0.02;

/// Power applied to the humidity deviation.
pub const HUMIDITY_FACTOR_EXPONENT: f64 = 1.2;

/// Lower clamp for humidity entering the humidity factor (%).
pub const HUMIDITY_FACTOR_MIN_PCT: f64 = 30.0;

/// Upper clamp for humidity entering the humidity factor (%).
pub const HUMIDITY_FACTOR_MAX_PCT: f64 = 100.0;

// ===== UNCERTAINTY =====

/// Fractional uncertainty used when the caller supplies none (±20 %).
pub const DEFAULT_UNCERTAINTY_FRACTION: f64 = 0.2;

/// Largest accepted uncertainty fraction.
///
/// Above this the lower bound collapses toward zero and stops carrying
/// information.
pub const MAX_UNCERTAINTY_FRACTION: f64 = 0.9;

// ===== HYBRID FUSION =====

/// Default weight of the Arrhenius estimate in the hybrid prediction.
pub const DEFAULT_HYBRID_ALPHA: f64 = 0.35;
