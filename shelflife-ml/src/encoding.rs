//! One-hot feature encoding
//!
//! Turns `(product, temperature, humidity)` into a [`Sample`] laid out by a
//! [`FeatureSchema`]. The same encoder serves training and inference, so a
//! row can never be encoded two different ways.

use shelflife_core::ShelfLifeError;
use shelflife_dataset::{Dataset, Observation};

use crate::{FeatureSchema, MLError, MLResult, Sample, MAX_FEATURES};

/// Encoder bound to one feature schema
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
}

impl FeatureEncoder {
    /// Use an existing schema
    pub fn new(schema: FeatureSchema) -> MLResult<Self> {
        schema.validate()?;
        Ok(Self { schema })
    }

    /// Derive the schema from the product types in a dataset
    pub fn fit(dataset: &Dataset) -> MLResult<Self> {
        if dataset.is_empty() {
            return Err(MLError::InsufficientData {
                required: 1,
                available: 0,
            });
        }
        Self::new(FeatureSchema::from_categories(dataset.product_types())?)
    }

    /// Schema the encoder writes
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Give up the schema, e.g. to store it with a model
    pub fn into_schema(self) -> FeatureSchema {
        self.schema
    }

    /// Encode one storage condition
    pub fn encode(&self, product: &str, temperature_c: f64, humidity_pct: f64) -> MLResult<Sample> {
        if !temperature_c.is_finite() {
            return Err(ShelfLifeError::InvalidInput {
                reason: "temperature is not a finite number",
            }
            .into());
        }
        if !humidity_pct.is_finite() {
            return Err(ShelfLifeError::InvalidInput {
                reason: "humidity is not a finite number",
            }
            .into());
        }

        let column = self.schema.indicator_column(product)?;

        let mut features = [0.0; MAX_FEATURES];
        features[0] = temperature_c;
        features[1] = humidity_pct;
        if let Some(column) = column {
            features[column] = 1.0;
        }
        Sample::new(&features[..self.schema.num_features()])
    }

    /// Encode one dataset row
    pub fn encode_observation(&self, observation: &Observation) -> MLResult<Sample> {
        self.encode(
            &observation.product_type,
            observation.temperature_c,
            observation.humidity_pct,
        )
    }

    /// Encode every row, returning features and shelf-life targets
    pub fn encode_dataset(&self, dataset: &Dataset) -> MLResult<(Vec<Sample>, Vec<f64>)> {
        let mut samples = Vec::with_capacity(dataset.len());
        let mut targets = Vec::with_capacity(dataset.len());

        for observation in dataset {
            samples.push(self.encode_observation(observation)?);
            targets.push(observation.shelf_life_days as f64);
        }
        Ok((samples, targets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Observation::new("Banana", 20.0, 95.0, 2),
            Observation::new("Apple", 4.0, 90.0, 60),
            Observation::new("Carrot", 1.0, 95.0, 29),
        ])
    }

    #[test]
    fn test_baseline_encodes_all_zero() {
        let encoder = FeatureEncoder::fit(&dataset()).unwrap();
        let sample = encoder.encode("Apple", 4.0, 90.0).unwrap();
        assert_eq!(sample.as_slice(), &[4.0, 90.0, 0.0, 0.0]);
    }

    #[test]
    fn test_indicator_set_for_category() {
        let encoder = FeatureEncoder::fit(&dataset()).unwrap();
        assert_eq!(encoder.encode("Banana", 20.0, 95.0).unwrap().as_slice(), &[20.0, 95.0, 1.0, 0.0]);
        assert_eq!(encoder.encode("carrot", 1.0, 95.0).unwrap().as_slice(), &[1.0, 95.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_category_fails_fast() {
        let encoder = FeatureEncoder::fit(&dataset()).unwrap();
        assert!(matches!(encoder.encode("Mango", 10.0, 90.0), Err(MLError::SchemaMismatch(_))));
    }

    #[test]
    fn test_non_finite_readings_rejected() {
        let encoder = FeatureEncoder::fit(&dataset()).unwrap();
        assert!(matches!(encoder.encode("Apple", f64::NAN, 90.0), Err(MLError::Engine(_))));
        assert!(matches!(encoder.encode("Apple", 4.0, f64::INFINITY), Err(MLError::Engine(_))));
    }

    #[test]
    fn test_encode_dataset_targets() {
        let encoder = FeatureEncoder::fit(&dataset()).unwrap();
        let (samples, targets) = encoder.encode_dataset(&dataset()).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(targets, vec![2.0, 60.0, 29.0]);
        assert!(samples.iter().all(|s| s.len() == 4));
    }

    #[test]
    fn test_empty_dataset() {
        assert!(FeatureEncoder::fit(&Dataset::default()).is_err());
    }

    proptest! {
        #[test]
        fn at_most_one_indicator_per_row(
            product in prop::sample::select(vec!["Apple", "banana", "CARROT"]),
            temperature in -30.0f64..60.0,
            humidity in 0.0f64..100.0
        ) {
            let encoder = FeatureEncoder::fit(&dataset()).unwrap();
            let sample = encoder.encode(product, temperature, humidity).unwrap();
            let indicators = &sample.as_slice()[2..];

            prop_assert_eq!(sample.as_slice()[..2].to_vec(), vec![temperature, humidity]);
            prop_assert!(indicators.iter().all(|&v| v == 0.0 || v == 1.0));
            let set = indicators.iter().filter(|&&v| v == 1.0).count();
            prop_assert_eq!(set, if product == "Apple" { 0 } else { 1 });
        }
    }
}
