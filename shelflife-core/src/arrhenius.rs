//! Arrhenius Kinetic Shelf-Life Model
//!
//! ## Physics Background
//!
//! Quality loss in fresh produce (softening, colour loss, vitamin C loss)
//! behaves like a first-order chemical reaction. Its rate constant follows
//! the Arrhenius equation:
//!
//! ```text
//! k(T) = A · exp(-Ea / (R · T))
//! ```
//!
//! with `T` in Kelvin, `Ea` the activation energy (J/mol), `A` the
//! pre-exponential factor (1/day) and `R` the gas constant. `k` grows
//! strictly with temperature; products with a larger `Ea` are more
//! sensitive to it.
//!
//! ### Shelf-Life Ratio
//!
//! Shelf life of a first-order process is proportional to `1/k`, so the
//! shelf life at `T` relative to the reference temperature is:
//!
//! ```text
//! SLR = k(T_ref) / k(T)
//! ```
//!
//! `SLR > 1` means the product keeps longer than in a 5°C refrigerator,
//! `SLR < 1` means it spoils `1/SLR` times faster.
//!
//! ### Characteristic Life
//!
//! `τ = 1/k(T)` is the time (days) for the quality attribute to fall to
//! `1/e` of its initial value. It is reported as `life_days`.
//!
//! ### Degenerate Rates
//!
//! For any finite temperature above absolute zero `k > 0`, but `exp` can
//! underflow to exactly zero for extreme constants. The model reports the
//! ratio and life as `+∞` in that case and marks the estimate degenerate
//! instead of dividing by zero.
//!
//! ## Humidity
//!
//! The kinetic constants are fitted at high humidity. The hybrid estimate
//! scales them with a humidity factor that peaks at 90 %RH:
//!
//! ```text
//! h = exp(-0.02 · |RH - 90|^1.2),   RH clamped to [30, 100]
//! ```
//!
//! ## Absolute Estimates
//!
//! Given a baseline shelf life measured at the reference temperature, the
//! ratio turns into days, and the product's age into days remaining. An
//! uncertainty fraction `f` gives `[1 - f, 1 + f]` bounds on both.
//!
//! ## Usage Example
//!
//! ```rust
//! use shelflife_core::{arrhenius::ArrheniusModel, profiles::kinetic_profile};
//!
//! let model = ArrheniusModel::default();
//! let apple = kinetic_profile("apple")?;
//!
//! let warm = model.evaluate(apple, 25.0);
//! assert!(warm.shelf_life_ratio < 1.0);
//!
//! let estimate = warm.life_estimate(60.0, 2.0, 0.2).unwrap();
//! assert!(estimate.remaining_days < estimate.estimated_shelf_life_days);
//! # Ok::<(), shelflife_core::ShelfLifeError>(())
//! ```

use core::fmt;

use crate::{
    constants::{
        physics::{GAS_CONSTANT_J_PER_MOL_K, KELVIN_OFFSET, RATIO_EQUALITY_TOLERANCE, REFERENCE_TEMPERATURE_C},
        storage::{
            HUMIDITY_FACTOR_EXPONENT, HUMIDITY_FACTOR_MAX_PCT, HUMIDITY_FACTOR_MIN_PCT,
            HUMIDITY_FACTOR_SCALE, OPTIMAL_STORAGE_HUMIDITY_PCT,
        },
    },
    profiles::KineticProfile,
};

/// Convert Celsius to Kelvin
pub fn celsius_to_kelvin(temperature_c: f64) -> f64 {
    temperature_c + KELVIN_OFFSET
}

/// Arrhenius rate constant `k = A·exp(-Ea/(R·T))` in 1/day
pub fn rate_constant(activation_energy_j_per_mol: f64, pre_exponential_factor: f64, temperature_k: f64) -> f64 {
    pre_exponential_factor * libm::exp(-activation_energy_j_per_mol / (GAS_CONSTANT_J_PER_MOL_K * temperature_k))
}

/// Humidity multiplier for the hybrid estimate, 1.0 at 90 %RH
pub fn humidity_factor(relative_humidity_pct: f64) -> f64 {
    let rh = relative_humidity_pct
        .max(HUMIDITY_FACTOR_MIN_PCT)
        .min(HUMIDITY_FACTOR_MAX_PCT);
    let deviation = libm::fabs(rh - OPTIMAL_STORAGE_HUMIDITY_PCT);
    libm::exp(-HUMIDITY_FACTOR_SCALE * libm::pow(deviation, HUMIDITY_FACTOR_EXPONENT))
}

/// Arrhenius model configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrheniusModel {
    /// Temperature the shelf-life ratio is normalized against (°C)
    pub reference_temperature_c: f64,
}

impl Default for ArrheniusModel {
    fn default() -> Self {
        Self {
            reference_temperature_c: REFERENCE_TEMPERATURE_C,
        }
    }
}

impl ArrheniusModel {
    /// Create a model normalized against a different reference temperature
    pub fn with_reference(reference_temperature_c: f64) -> Self {
        Self { reference_temperature_c }
    }

    /// Reference temperature in Kelvin
    pub fn reference_temperature_k(&self) -> f64 {
        celsius_to_kelvin(self.reference_temperature_c)
    }

    /// Evaluate the rate law for a product at a storage temperature
    ///
    /// The temperature must already be validated (finite, above absolute zero).
    pub fn evaluate(&self, profile: &KineticProfile, temperature_c: f64) -> KineticEstimate {
        let temperature_k = celsius_to_kelvin(temperature_c);
        let ea = profile.activation_energy_j_per_mol;
        let a = profile.pre_exponential_factor;

        let degradation_rate = rate_constant(ea, a, temperature_k);
        let reference_rate = rate_constant(ea, a, self.reference_temperature_k());

        let (shelf_life_ratio, life_days) = if degradation_rate == 0.0 {
            (f64::INFINITY, f64::INFINITY)
        } else {
            (reference_rate / degradation_rate, 1.0 / degradation_rate)
        };

        log_debug!(
            "{}: T={}K k={:e}/day k_ref={:e}/day SLR={}",
            profile.product_name,
            temperature_k,
            degradation_rate,
            reference_rate,
            shelf_life_ratio
        );

        KineticEstimate {
            temperature_c,
            temperature_k,
            reference_temperature_c: self.reference_temperature_c,
            degradation_rate,
            reference_rate,
            shelf_life_ratio,
            life_days,
        }
    }
}

/// Output of one rate-law evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KineticEstimate {
    /// Storage temperature (°C)
    pub temperature_c: f64,
    /// Storage temperature (K)
    pub temperature_k: f64,
    /// Reference temperature the ratio is relative to (°C)
    pub reference_temperature_c: f64,
    /// Rate constant at the storage temperature (1/day)
    pub degradation_rate: f64,
    /// Rate constant at the reference temperature (1/day)
    pub reference_rate: f64,
    /// Shelf life relative to the reference temperature
    pub shelf_life_ratio: f64,
    /// Characteristic life `1/k` (days)
    pub life_days: f64,
}

impl KineticEstimate {
    /// True when the ratio is unbounded, either because the rate underflowed
    /// to zero or because `k_ref / k` overflowed
    pub fn is_degenerate(&self) -> bool {
        !self.shelf_life_ratio.is_finite()
    }

    /// Classify the ratio against the reference temperature
    pub fn conclusion(&self) -> Conclusion {
        let reference_c = self.reference_temperature_c;
        let ratio = self.shelf_life_ratio;

        if self.is_degenerate() {
            Conclusion::NotApplicable { reference_c }
        } else if libm::fabs(ratio - 1.0) <= RATIO_EQUALITY_TOLERANCE {
            Conclusion::Same { reference_c }
        } else if ratio > 1.0 {
            Conclusion::Longer { ratio, reference_c }
        } else {
            Conclusion::Faster {
                speedup: 1.0 / ratio,
                reference_c,
            }
        }
    }

    /// Absolute shelf life and days remaining from a reference baseline
    ///
    /// Returns `None` when the ratio is unbounded or the baseline is
    /// negative or not a number. Negative ages count as zero. The
    /// uncertainty fraction is expected to be validated already.
    pub fn life_estimate(&self, baseline_days_at_reference: f64, age_days: f64, uncertainty_fraction: f64) -> Option<LifeEstimate> {
        if !self.shelf_life_ratio.is_finite() || !baseline_days_at_reference.is_finite() || baseline_days_at_reference < 0.0 {
            return None;
        }

        // NaN ages fall out of max() as zero
        let age = age_days.max(0.0);
        let remaining = |days: f64| (days - age).max(0.0);

        let estimated = baseline_days_at_reference * self.shelf_life_ratio;
        let estimated_range = Bounds::around(estimated, uncertainty_fraction);

        Some(LifeEstimate {
            estimated_shelf_life_days: estimated,
            estimated_range,
            remaining_days: remaining(estimated),
            remaining_range: Bounds {
                lower: remaining(estimated_range.lower),
                upper: remaining(estimated_range.upper),
            },
        })
    }
}

/// Closed interval of days
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
}

impl Bounds {
    /// `[value·(1 - f), value·(1 + f)]`
    pub fn around(value: f64, fraction: f64) -> Self {
        Self {
            lower: value * (1.0 - fraction),
            upper: value * (1.0 + fraction),
        }
    }

    /// Check if a value falls inside the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Absolute shelf-life figures derived from a baseline
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifeEstimate {
    /// Baseline scaled by the shelf-life ratio (days)
    pub estimated_shelf_life_days: f64,
    /// Uncertainty bounds on the estimate
    pub estimated_range: Bounds,
    /// Estimate minus the product's age, floored at zero (days)
    pub remaining_days: f64,
    /// Uncertainty bounds on the remaining days, floored at zero
    pub remaining_range: Bounds,
}

/// Plain-language classification of a shelf-life ratio
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Conclusion {
    /// Keeps `ratio` times longer than at the reference
    Longer {
        /// Shelf-life ratio
        ratio: f64,
        /// Reference temperature (°C)
        reference_c: f64,
    },
    /// Spoils `speedup` times faster than at the reference
    Faster {
        /// Inverse of the shelf-life ratio
        speedup: f64,
        /// Reference temperature (°C)
        reference_c: f64,
    },
    /// Same as at the reference
    Same {
        /// Reference temperature (°C)
        reference_c: f64,
    },
    /// Rate too small for a finite ratio; no meaningful comparison
    NotApplicable {
        /// Reference temperature (°C)
        reference_c: f64,
    },
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Longer { ratio, reference_c } => {
                write!(f, "Shelf life is {:.2} times LONGER than at {:.1}°C.", ratio, reference_c)
            }
            Self::Faster { speedup, reference_c } => {
                write!(f, "Spoilage is {:.2} times FASTER than at {:.1}°C.", speedup, reference_c)
            }
            Self::Same { reference_c } => {
                write!(f, "Shelf life is approximately the same as at {:.1}°C.", reference_c)
            }
            Self::NotApplicable { reference_c } => {
                write!(f, "Not applicable: degradation rate is effectively zero, no comparison with {:.1}°C.", reference_c)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{kinetic_profile, KINETIC_PROFILES};
    use alloc::string::ToString;
    use proptest::prelude::*;

    fn apple() -> &'static KineticProfile {
        kinetic_profile("apple").unwrap()
    }

    #[test]
    fn kelvin_conversion() {
        assert_eq!(celsius_to_kelvin(5.0), 278.15);
        assert_eq!(celsius_to_kelvin(-273.15), 0.0);
    }

    #[test]
    fn apple_at_reference_is_unchanged() {
        let estimate = ArrheniusModel::default().evaluate(apple(), 5.0);

        assert_eq!(estimate.temperature_k, 278.15);
        assert!((estimate.shelf_life_ratio - 1.0).abs() < 1e-12);
        assert!(matches!(estimate.conclusion(), Conclusion::Same { .. }));
        assert_eq!(
            estimate.conclusion().to_string(),
            "Shelf life is approximately the same as at 5.0°C."
        );
    }

    #[test]
    fn apple_rate_matches_hand_calculation() {
        let estimate = ArrheniusModel::default().evaluate(apple(), 5.0);
        let expected = 2.0e11 * (-70_000.0 / (8.314 * 278.15f64)).exp();

        assert!((estimate.degradation_rate - expected).abs() / expected < 1e-12);
        assert!((estimate.life_days - 1.0 / expected).abs() < 1e-9);
        assert!((estimate.life_days - 69.8).abs() < 0.5);
    }

    #[test]
    fn warm_apple_spoils_faster() {
        let estimate = ArrheniusModel::default().evaluate(apple(), 25.0);

        assert!(estimate.shelf_life_ratio < 1.0);
        match estimate.conclusion() {
            Conclusion::Faster { speedup, .. } => {
                assert!((speedup - 1.0 / estimate.shelf_life_ratio).abs() < 1e-9);
                assert!(speedup > 7.0 && speedup < 8.0);
            }
            other => panic!("expected Faster, got {:?}", other),
        }
        assert!(estimate.conclusion().to_string().starts_with("Spoilage is"));
    }

    #[test]
    fn frozen_apple_keeps_longer() {
        let estimate = ArrheniusModel::default().evaluate(apple(), -5.0);

        assert!(estimate.shelf_life_ratio > 1.0);
        assert!(matches!(estimate.conclusion(), Conclusion::Longer { .. }));
        assert!(estimate.conclusion().to_string().contains("LONGER"));
    }

    #[test]
    fn custom_reference_temperature() {
        let model = ArrheniusModel::with_reference(20.0);
        let estimate = model.evaluate(apple(), 20.0);
        assert!((estimate.shelf_life_ratio - 1.0).abs() < 1e-12);
        assert!(estimate.conclusion().to_string().ends_with("20.0°C."));
    }

    #[test]
    fn zero_rate_is_degenerate_not_a_panic() {
        let inert = KineticProfile {
            product_name: "inert",
            activation_energy_j_per_mol: 70_000.0,
            pre_exponential_factor: 0.0,
            spoilage_metric: "none",
        };
        let estimate = ArrheniusModel::default().evaluate(&inert, 5.0);

        assert!(estimate.is_degenerate());
        assert_eq!(estimate.shelf_life_ratio, f64::INFINITY);
        assert_eq!(estimate.life_days, f64::INFINITY);
        assert!(matches!(estimate.conclusion(), Conclusion::NotApplicable { .. }));
        assert!(estimate.life_estimate(30.0, 0.0, 0.2).is_none());
    }

    #[test]
    fn overflowing_ratio_is_degenerate() {
        // Subnormal rate: positive, but k_ref / k overflows
        let degradation_rate = 1e-320;
        let estimate = KineticEstimate {
            temperature_c: -262.0,
            temperature_k: celsius_to_kelvin(-262.0),
            reference_temperature_c: 5.0,
            degradation_rate,
            reference_rate: 1.0,
            shelf_life_ratio: 1.0 / degradation_rate,
            life_days: 1.0 / degradation_rate,
        };

        assert!(estimate.degradation_rate > 0.0);
        assert!(estimate.is_degenerate());
        assert!(matches!(estimate.conclusion(), Conclusion::NotApplicable { .. }));
        assert!(estimate.life_estimate(30.0, 0.0, 0.2).is_none());
    }

    #[test]
    fn life_estimate_with_age_and_bounds() {
        let estimate = ArrheniusModel::default().evaluate(apple(), 5.0);
        let life = estimate.life_estimate(60.0, 10.0, 0.2).unwrap();

        assert!((life.estimated_shelf_life_days - 60.0).abs() < 1e-9);
        assert!((life.estimated_range.lower - 48.0).abs() < 1e-9);
        assert!((life.estimated_range.upper - 72.0).abs() < 1e-9);
        assert!((life.remaining_days - 50.0).abs() < 1e-9);
        assert!((life.remaining_range.lower - 38.0).abs() < 1e-9);
        assert!((life.remaining_range.upper - 62.0).abs() < 1e-9);
    }

    #[test]
    fn remaining_days_never_negative() {
        let estimate = ArrheniusModel::default().evaluate(apple(), 30.0);
        let life = estimate.life_estimate(60.0, 365.0, 0.5).unwrap();

        assert_eq!(life.remaining_days, 0.0);
        assert_eq!(life.remaining_range.lower, 0.0);
        assert_eq!(life.remaining_range.upper, 0.0);
    }

    #[test]
    fn negative_baseline_gives_no_estimate() {
        let estimate = ArrheniusModel::default().evaluate(apple(), 5.0);
        assert!(estimate.life_estimate(-1.0, 0.0, 0.2).is_none());
        assert!(estimate.life_estimate(f64::NAN, 0.0, 0.2).is_none());
    }

    #[test]
    fn negative_age_counts_as_new() {
        let estimate = ArrheniusModel::default().evaluate(apple(), 5.0);
        let life = estimate.life_estimate(60.0, -4.0, 0.0).unwrap();
        assert!((life.remaining_days - 60.0).abs() < 1e-9);
    }

    #[test]
    fn humidity_factor_peaks_at_ninety() {
        assert_eq!(humidity_factor(90.0), 1.0);
        assert!(humidity_factor(80.0) < 1.0);
        assert!(humidity_factor(100.0) < 1.0);
        // 10 %RH is clamped to 30 before use
        assert_eq!(humidity_factor(10.0), humidity_factor(30.0));
        assert_eq!(humidity_factor(120.0), humidity_factor(100.0));

        let expected = (-0.02 * 10.0f64.powf(1.2)).exp();
        assert!((humidity_factor(80.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn bounds_contain_their_centre() {
        let bounds = Bounds::around(10.0, 0.3);
        assert!(bounds.contains(10.0));
        assert!(!bounds.contains(13.5));
    }

    proptest! {
        #[test]
        fn rate_strictly_increases_with_temperature(
            index in 0usize..KINETIC_PROFILES.len(),
            t1 in -60.0f64..80.0,
            delta in 0.5f64..40.0,
        ) {
            let profile = &KINETIC_PROFILES[index];
            let k1 = rate_constant(
                profile.activation_energy_j_per_mol,
                profile.pre_exponential_factor,
                celsius_to_kelvin(t1),
            );
            let k2 = rate_constant(
                profile.activation_energy_j_per_mol,
                profile.pre_exponential_factor,
                celsius_to_kelvin(t1 + delta),
            );
            prop_assert!(k1 < k2);
        }

        #[test]
        fn ratio_is_positive_and_finite(
            index in 0usize..KINETIC_PROFILES.len(),
            temperature in -60.0f64..80.0,
        ) {
            let estimate = ArrheniusModel::default().evaluate(&KINETIC_PROFILES[index], temperature);
            prop_assert!(estimate.shelf_life_ratio > 0.0);
            prop_assert!(estimate.shelf_life_ratio.is_finite());
            prop_assert!((estimate.life_days * estimate.degradation_rate - 1.0).abs() < 1e-9);
        }
    }
}
