//! Physical Constants for ShelfLife
//!
//! Values used by the Arrhenius rate law. All temperatures handed to the
//! public API are in Celsius; the rate law itself works in Kelvin.

/// Universal gas constant R (J/(mol·K)).
///
/// Appears in the Arrhenius exponent `-Ea / (R·T)`.
///
/// Source: CODATA, rounded to four significant figures
pub const GAS_CONSTANT_J_PER_MOL_K: f64 = 8.314;

/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Absolute zero in Celsius (°C).
///
/// The Arrhenius exponent is undefined at 0 K, so storage temperatures at
/// or below this value are rejected.
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -KELVIN_OFFSET;

/// Reference storage temperature (°C).
///
/// Shelf-life ratios are expressed relative to a typical refrigerator
/// setting. A ratio of 2.0 means the product lasts twice as long as it
/// would at this temperature.
pub const REFERENCE_TEMPERATURE_C: f64 = 5.0;

/// Tolerance used when deciding that a shelf-life ratio equals 1.
pub const RATIO_EQUALITY_TOLERANCE: f64 = 1e-9;
