//! Hybrid physics + learned shelf-life estimate
//!
//! Blends the Arrhenius model with the trained forest:
//!
//! ```text
//! arrhenius = base_shelf_life × SLR(T) × h(RH)
//! hybrid    = α · arrhenius + (1 - α) · ml
//! ```
//!
//! `base_shelf_life` comes from the same product profile that labelled the
//! training data, so both estimates are in the same days. The product must
//! be in the kinetic table, the profile table and the model's schema.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use shelflife_core::{
    arrhenius::humidity_factor,
    constants::DEFAULT_HYBRID_ALPHA,
    profiles::{capitalize, kinetic_profile, product_profile},
    ArrheniusModel, HumidityValidator, ShelfLifeError, TemperatureValidator, Validator,
};

use crate::{FeatureEncoder, MLResult, Regressor, TrainedModel};

/// Hybrid fusion configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridConfig {
    /// Weight of the Arrhenius estimate, in [0, 1]
    pub alpha: f64,
    /// Kinetic model (reference temperature)
    pub kinetics: ArrheniusModel,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_HYBRID_ALPHA,
            kinetics: ArrheniusModel::default(),
        }
    }
}

fn check_alpha(alpha: f64) -> Result<f64, ShelfLifeError> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(ShelfLifeError::InvalidInput {
            reason: "alpha must be a number in [0, 1]",
        })
    }
}

/// Weighted blend of the two estimates
///
/// α = 0 returns `ml` and α = 1 returns `arrhenius` unchanged, even when
/// the other estimate is infinite.
pub fn fuse(alpha: f64, arrhenius_days: f64, ml_days: f64) -> f64 {
    if alpha == 0.0 {
        ml_days
    } else if alpha == 1.0 {
        arrhenius_days
    } else {
        alpha * arrhenius_days + (1.0 - alpha) * ml_days
    }
}

/// One fused estimate with its ingredients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridPrediction {
    /// Capitalized product name
    pub product: String,
    /// Storage temperature (°C)
    pub temperature_c: f64,
    /// Humidity after clamping to 0-100 %RH
    pub humidity_pct: f64,
    /// Arrhenius weight used
    pub alpha: f64,
    /// Shelf life relative to the reference temperature
    pub shelf_life_ratio: f64,
    /// Humidity multiplier applied to the kinetic estimate
    pub humidity_factor: f64,
    /// Kinetic estimate (days)
    pub arrhenius_days: f64,
    /// Forest estimate (days)
    pub ml_days: f64,
    /// Blended estimate (days)
    pub hybrid_days: f64,
}

/// Combines a shared trained model with the Arrhenius model
#[derive(Debug, Clone)]
pub struct HybridPredictor {
    model: Arc<TrainedModel>,
    encoder: FeatureEncoder,
    config: HybridConfig,
}

impl HybridPredictor {
    /// Create a predictor, rejecting an α outside [0, 1]
    pub fn new(model: Arc<TrainedModel>, config: HybridConfig) -> MLResult<Self> {
        check_alpha(config.alpha)?;
        let encoder = model.encoder()?;
        Ok(Self { model, encoder, config })
    }

    /// Active configuration
    pub fn config(&self) -> &HybridConfig {
        &self.config
    }

    /// Shared model
    pub fn model(&self) -> &Arc<TrainedModel> {
        &self.model
    }

    /// Fused estimate with the configured α
    pub fn predict(&self, product: &str, temperature_c: f64, humidity_pct: f64) -> MLResult<HybridPrediction> {
        self.predict_with_alpha(product, temperature_c, humidity_pct, self.config.alpha)
    }

    /// Fused estimate with a per-call α
    pub fn predict_with_alpha(
        &self,
        product: &str,
        temperature_c: f64,
        humidity_pct: f64,
        alpha: f64,
    ) -> MLResult<HybridPrediction> {
        let alpha = check_alpha(alpha)?;
        let kinetics = kinetic_profile(product)?;
        let profile = product_profile(product)?;

        let temperature_c = TemperatureValidator::default().validate(temperature_c)?;
        let humidity_pct = HumidityValidator::default().validate(humidity_pct)?;

        // Fails on products the model never saw instead of zero-filling
        let sample = self.encoder.encode(profile.type_name, temperature_c, humidity_pct)?;

        let estimate = self.config.kinetics.evaluate(kinetics, temperature_c);
        let humidity_factor = humidity_factor(humidity_pct);
        let arrhenius_days = profile.base_shelf_life_days * estimate.shelf_life_ratio * humidity_factor;

        if alpha > 0.0 && !arrhenius_days.is_finite() {
            return Err(ShelfLifeError::DegenerateRate {
                product: kinetics.product_name.to_string(),
                temperature_c,
            }
            .into());
        }

        let ml_days = self.model.predict(&sample)?;
        let hybrid_days = fuse(alpha, arrhenius_days, ml_days);

        debug!(
            "{} at {}°C/{}%: arrhenius {:.2} ml {:.2} hybrid {:.2} (α={})",
            profile.type_name, temperature_c, humidity_pct, arrhenius_days, ml_days, hybrid_days, alpha
        );

        Ok(HybridPrediction {
            product: capitalize(kinetics.product_name),
            temperature_c,
            humidity_pct,
            alpha,
            shelf_life_ratio: estimate.shelf_life_ratio,
            humidity_factor,
            arrhenius_days,
            ml_days,
            hybrid_days,
        })
    }
}
