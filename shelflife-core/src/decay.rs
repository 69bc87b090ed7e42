//! Empirical Shelf-Life Decay Formula
//!
//! ## Model
//!
//! Shelf life shrinks as storage conditions drift from a product's optimum.
//! Each deviation becomes a multiplicative penalty:
//!
//! ```text
//! ΔT = T - T_opt
//! t_penalty = 1 + 0.07·|ΔT| + 0.18·max(ΔT, 0)
//! h_penalty = 1 + 0.04·|ΔH| + 0.10·max(ΔH, 0)
//!
//! shelf_life = max(1, round(base_life / (t_penalty · h_penalty) + noise))
//! ```
//!
//! Deviations above the optimum cost more than deviations below it: warm,
//! wet storage speeds respiration and mould, while cool, dry storage mostly
//! causes slower chilling and wilting damage.
//!
//! The product of the two penalties models compounding risk. At the optimum
//! both are exactly 1 and the formula returns the base life.
//!
//! ## Noise
//!
//! The formula labels a synthetic training set, so it takes a noise term in
//! days. This module never draws randomness itself; the dataset generator
//! samples Gaussian noise from the generator it was handed and passes the
//! draw in. With `noise = 0.0` the formula is deterministic.
//!
//! ## Coefficients
//!
//! The coefficients are empirical and have no published derivation. They
//! are grouped in [`DecayCoefficients`] so a deployment can refit them
//! without touching the formula.

use crate::{
    constants::storage::{
        DECAY_HUMIDITY_EXCESS_PER_PCT, DECAY_HUMIDITY_LINEAR_PER_PCT, DECAY_NOISE_STD_DAYS,
        DECAY_TEMP_EXCESS_PER_C, DECAY_TEMP_LINEAR_PER_C, MIN_SHELF_LIFE_DAYS,
    },
    profiles::ProductProfile,
};

/// Penalty coefficients for the decay formula
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecayCoefficients {
    /// Penalty per °C of deviation, either side
    pub temp_linear: f64,
    /// Extra penalty per °C above the optimum
    pub temp_excess: f64,
    /// Penalty per %RH of deviation, either side
    pub humidity_linear: f64,
    /// Extra penalty per %RH above the optimum
    pub humidity_excess: f64,
    /// Standard deviation of label noise in days
    pub noise_std_days: f64,
}

impl Default for DecayCoefficients {
    fn default() -> Self {
        Self {
            temp_linear: DECAY_TEMP_LINEAR_PER_C,
            temp_excess: DECAY_TEMP_EXCESS_PER_C,
            humidity_linear: DECAY_HUMIDITY_LINEAR_PER_PCT,
            humidity_excess: DECAY_HUMIDITY_EXCESS_PER_PCT,
            noise_std_days: DECAY_NOISE_STD_DAYS,
        }
    }
}

impl DecayCoefficients {
    /// Penalty for one deviation
    fn penalty(deviation: f64, linear: f64, excess: f64) -> f64 {
        let above = if deviation > 0.0 { deviation } else { 0.0 };
        1.0 + linear * libm::fabs(deviation) + excess * above
    }

    /// Temperature and humidity penalties for a storage point
    pub fn penalties(&self, profile: &ProductProfile, temperature_c: f64, humidity_pct: f64) -> (f64, f64) {
        let t_penalty = Self::penalty(
            temperature_c - profile.optimal_temperature_c,
            self.temp_linear,
            self.temp_excess,
        );
        let h_penalty = Self::penalty(
            humidity_pct - profile.optimal_humidity_pct,
            self.humidity_linear,
            self.humidity_excess,
        );
        (t_penalty, h_penalty)
    }

    /// Noise-free shelf life in fractional days
    pub fn expected_shelf_life(&self, profile: &ProductProfile, temperature_c: f64, humidity_pct: f64) -> f64 {
        let (t_penalty, h_penalty) = self.penalties(profile, temperature_c, humidity_pct);
        profile.base_shelf_life_days / (t_penalty * h_penalty)
    }

    /// Shelf life in whole days with a noise draw applied
    ///
    /// Never returns less than one day. A non-finite intermediate (from a
    /// non-finite input) also collapses to one day.
    pub fn shelf_life_days(
        &self,
        profile: &ProductProfile,
        temperature_c: f64,
        humidity_pct: f64,
        noise_days: f64,
    ) -> u32 {
        let raw = self.expected_shelf_life(profile, temperature_c, humidity_pct) + noise_days;
        let days = libm::round(raw);

        if days.is_nan() || days < MIN_SHELF_LIFE_DAYS as f64 {
            MIN_SHELF_LIFE_DAYS
        } else {
            // float-to-int casts saturate at u32::MAX
            days as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{product_profile, PRODUCT_PROFILES};
    use proptest::prelude::*;

    #[test]
    fn optimum_has_no_penalty() {
        let coefficients = DecayCoefficients::default();
        for profile in PRODUCT_PROFILES.iter() {
            let (t, h) = coefficients.penalties(
                profile,
                profile.optimal_temperature_c,
                profile.optimal_humidity_pct,
            );
            assert_eq!(t, 1.0);
            assert_eq!(h, 1.0);
            assert_eq!(
                coefficients.shelf_life_days(
                    profile,
                    profile.optimal_temperature_c,
                    profile.optimal_humidity_pct,
                    0.0
                ),
                profile.base_shelf_life_days as u32
            );
        }
    }

    #[test]
    fn warm_deviation_costs_more_than_cold() {
        let coefficients = DecayCoefficients::default();
        let apple = product_profile("apple").unwrap();

        let (warm, _) = coefficients.penalties(apple, apple.optimal_temperature_c + 4.0, 90.0);
        let (cold, _) = coefficients.penalties(apple, apple.optimal_temperature_c - 4.0, 90.0);

        assert!((warm - (1.0 + 0.07 * 4.0 + 0.18 * 4.0)).abs() < 1e-12);
        assert!((cold - (1.0 + 0.07 * 4.0)).abs() < 1e-12);
        assert!(warm > cold);
    }

    #[test]
    fn worked_example() {
        // Banana at 20°C / 95%: ΔT = 7, ΔH = 10
        let coefficients = DecayCoefficients::default();
        let banana = product_profile("banana").unwrap();

        let t_penalty = 1.0 + 0.07 * 7.0 + 0.18 * 7.0;
        let h_penalty = 1.0 + 0.04 * 10.0 + 0.10 * 10.0;
        let expected = 14.0 / (t_penalty * h_penalty);

        let got = coefficients.expected_shelf_life(banana, 20.0, 95.0);
        assert!((got - expected).abs() < 1e-12);
        assert_eq!(coefficients.shelf_life_days(banana, 20.0, 95.0, 0.0), 2);
    }

    #[test]
    fn noise_shifts_before_rounding() {
        let coefficients = DecayCoefficients::default();
        let potato = product_profile("potato").unwrap();
        assert_eq!(coefficients.shelf_life_days(potato, 7.0, 90.0, 0.6), 91);
        assert_eq!(coefficients.shelf_life_days(potato, 7.0, 90.0, -0.6), 89);
    }

    #[test]
    fn non_finite_input_collapses_to_one_day() {
        let coefficients = DecayCoefficients::default();
        let grape = product_profile("grape").unwrap();
        assert_eq!(coefficients.shelf_life_days(grape, f64::NAN, 90.0, 0.0), 1);
        assert_eq!(coefficients.shelf_life_days(grape, f64::INFINITY, 90.0, 0.0), 1);
    }

    proptest! {
        #[test]
        fn never_below_one_day(
            index in 0usize..PRODUCT_PROFILES.len(),
            temperature in -100.0f64..200.0,
            humidity in -50.0f64..150.0,
            noise in -50.0f64..50.0,
        ) {
            let coefficients = DecayCoefficients::default();
            let days = coefficients.shelf_life_days(&PRODUCT_PROFILES[index], temperature, humidity, noise);
            prop_assert!(days >= 1);
        }
    }
}
