//! Shelf-life query interface
//!
//! The one entry point hosts call: validate the request, look up the
//! product, run the Arrhenius model and assemble a [`PredictionResult`].
//!
//! Order of checks matters for the error a caller sees. The product is
//! looked up first, so an unsupported product is reported as such whatever
//! the readings are. Temperature is validated next and rejected when
//! unusable. Humidity and uncertainty are clamped.

use alloc::string::{String, ToString};

use crate::{
    arrhenius::{humidity_factor, ArrheniusModel, Conclusion, KineticEstimate, LifeEstimate},
    constants::storage::DEFAULT_UNCERTAINTY_FRACTION,
    errors::ShelfLifeResult,
    profiles::{capitalize, kinetic_profile, KINETIC_PROFILES},
    traits::Validator,
    validators::{HumidityValidator, TemperatureValidator, UncertaintyValidator},
};

/// A single shelf-life query
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictionRequest {
    /// Product name as typed by the caller
    pub product: String,
    /// Storage temperature (°C)
    pub temperature_c: f64,
    /// Relative humidity (%), reported with its humidity factor
    pub humidity_pct: Option<f64>,
    /// Shelf life at the reference temperature (days), enables absolute estimates
    pub baseline_days: Option<f64>,
    /// Days the product has already spent in storage
    pub age_days: f64,
    /// Fractional width of the estimate bounds
    pub uncertainty_fraction: f64,
}

impl PredictionRequest {
    /// Query a product at a storage temperature
    pub fn new(product: &str, temperature_c: f64) -> Self {
        Self {
            product: product.to_string(),
            temperature_c,
            humidity_pct: None,
            baseline_days: None,
            age_days: 0.0,
            uncertainty_fraction: DEFAULT_UNCERTAINTY_FRACTION,
        }
    }

    /// Attach a humidity reading
    pub fn with_humidity(mut self, humidity_pct: f64) -> Self {
        self.humidity_pct = Some(humidity_pct);
        self
    }

    /// Attach the shelf life measured at the reference temperature
    pub fn with_baseline_days(mut self, baseline_days: f64) -> Self {
        self.baseline_days = Some(baseline_days);
        self
    }

    /// Set how long the product has been stored
    pub fn with_age_days(mut self, age_days: f64) -> Self {
        self.age_days = age_days;
        self
    }

    /// Set the uncertainty fraction for the estimate bounds
    pub fn with_uncertainty(mut self, fraction: f64) -> Self {
        self.uncertainty_fraction = fraction;
        self
    }
}

/// Humidity as used by the query
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HumidityReading {
    /// Humidity after clamping to 0-100 %RH
    pub relative_humidity_pct: f64,
    /// Humidity factor at that reading; informational, not applied to the ratio
    pub humidity_factor: f64,
}

/// Answer to a [`PredictionRequest`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictionResult {
    /// Capitalized product name
    pub product: String,
    /// Capitalized spoilage metric label
    pub spoilage_metric: String,
    /// Activation energy (kJ/mol)
    pub activation_energy_kj_per_mol: f64,
    /// Rate-law evaluation at the storage temperature
    pub kinetics: KineticEstimate,
    /// Humidity, when the request carried one
    pub humidity: Option<HumidityReading>,
    /// Comparison against the reference temperature
    pub conclusion: Conclusion,
    /// `conclusion` rendered as a sentence
    pub conclusion_text: String,
    /// Uncertainty fraction after clamping
    pub uncertainty_fraction: f64,
    /// Absolute estimates, when a baseline was given and the ratio is finite
    pub life: Option<LifeEstimate>,
}

impl PredictionResult {
    /// Shelf life relative to the reference temperature
    pub fn shelf_life_ratio(&self) -> f64 {
        self.kinetics.shelf_life_ratio
    }

    /// True when the ratio is unbounded and the comparison is not applicable
    pub fn is_degenerate(&self) -> bool {
        self.kinetics.is_degenerate()
    }
}

/// Estimate shelf life with the default Arrhenius model (5°C reference)
pub fn predict_shelf_life(request: &PredictionRequest) -> ShelfLifeResult<PredictionResult> {
    predict_with_model(&ArrheniusModel::default(), request)
}

/// Estimate shelf life against a configured reference temperature
pub fn predict_with_model(model: &ArrheniusModel, request: &PredictionRequest) -> ShelfLifeResult<PredictionResult> {
    let profile = kinetic_profile(&request.product)?;
    let temperature_c = TemperatureValidator::default().validate(request.temperature_c)?;

    let humidity = request
        .humidity_pct
        .map(|raw| HumidityValidator::default().validate(raw))
        .transpose()?
        .map(|rh| HumidityReading {
            relative_humidity_pct: rh,
            humidity_factor: humidity_factor(rh),
        });

    let uncertainty_fraction = UncertaintyValidator::default().validate(request.uncertainty_fraction)?;

    let kinetics = model.evaluate(profile, temperature_c);
    let life = request
        .baseline_days
        .and_then(|baseline| kinetics.life_estimate(baseline, request.age_days, uncertainty_fraction));

    if kinetics.is_degenerate() {
        log_warn!("{}: shelf-life ratio is unbounded at {}°C", profile.product_name, temperature_c);
    }

    let conclusion = kinetics.conclusion();
    Ok(PredictionResult {
        product: capitalize(profile.product_name),
        spoilage_metric: capitalize(profile.spoilage_metric),
        activation_energy_kj_per_mol: profile.activation_energy_kj_per_mol(),
        conclusion_text: conclusion.to_string(),
        conclusion,
        kinetics,
        humidity,
        uncertainty_fraction,
        life,
    })
}

/// One row of the supported-products listing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProductSummary {
    /// Lookup key
    pub name: &'static str,
    /// Quality attribute the constants describe
    pub spoilage_metric: &'static str,
    /// Activation energy (kJ/mol)
    pub activation_energy_kj_per_mol: f64,
}

/// Every product the kinetic model supports, alphabetically
pub fn supported_products() -> impl Iterator<Item = ProductSummary> {
    KINETIC_PROFILES.iter().map(|profile| ProductSummary {
        name: profile.product_name,
        spoilage_metric: profile.spoilage_metric,
        activation_energy_kj_per_mol: profile.activation_energy_kj_per_mol(),
    })
}

/// Number of products the kinetic model supports
pub fn product_count() -> usize {
    KINETIC_PROFILES.len()
}
