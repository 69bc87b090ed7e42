//! Learned Shelf-Life Regression and Hybrid Fusion
//!
//! ## Overview
//!
//! This crate learns shelf life from the synthetic dataset produced by
//! `shelflife-dataset` and fuses the learned estimate with the Arrhenius
//! model from `shelflife-core`.
//!
//! ## Why a Random Forest?
//!
//! 1. **Tabular data**: two numeric readings plus a product category
//! 2. **No scaling**: threshold splits don't care about units
//! 3. **Non-linear**: the decay formula's kinked penalties are easy for trees
//! 4. **Interpretable**: impurity-based importances show which inputs matter
//!
//! ## Algorithm Overview
//!
//! ```text
//! Tree:   recursive binary splits minimizing squared error (CART)
//! Forest: N trees, each fitted on a bootstrap resample of the rows
//! Predict: mean of the tree predictions
//! ```
//!
//! ## Feature Schema
//!
//! Product type is one-hot encoded with the alphabetically first category
//! dropped, after the numeric columns:
//!
//! ```text
//! Temperature_C, Humidity_%, Type_Banana, Type_Carrot, ...
//! ```
//!
//! The column layout is captured in a versioned [`FeatureSchema`] that is
//! stored next to the forest. Inference encodes through the same schema, so
//! a product the model was never trained on is a [`MLError::SchemaMismatch`]
//! rather than a silently zero-filled row.
//!
//! ## Hybrid Fusion
//!
//! ```text
//! arrhenius = base_shelf_life × SLR(T) × h(RH)
//! hybrid    = α · arrhenius + (1 - α) · ml
//! ```
//!
//! With α = 0 the result is exactly the learned estimate, with α = 1
//! exactly the kinetic one.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use shelflife_dataset::generate_default_dataset;
//! use shelflife_ml::{HybridConfig, HybridPredictor, Trainer, TrainerConfig};
//!
//! let dataset = generate_default_dataset()?;
//! let (model, report) = Trainer::new(TrainerConfig::default())?.train(&dataset)?;
//! println!("MAE {:.2} days, R² {:.3}", report.mae, report.r2);
//!
//! let predictor = HybridPredictor::new(Arc::new(model), HybridConfig::default())?;
//! let fused = predictor.predict("banana", 20.0, 85.0)?;
//! println!("{:.1} days", fused.hybrid_days);
//! # Ok::<(), shelflife_ml::MLError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use shelflife_core::ShelfLifeError;
use shelflife_dataset::DatasetError;

pub mod artifact;
pub mod encoding;
pub mod forest;
pub mod hybrid;
pub mod metrics;
pub mod node;
pub mod schema;
pub mod trainer;
pub mod tree;

pub use artifact::ARTIFACT_FORMAT;
pub use encoding::FeatureEncoder;
pub use forest::{ForestConfig, ForestStats, RandomForest};
pub use hybrid::{fuse, HybridConfig, HybridPrediction, HybridPredictor};
pub use metrics::{mean_absolute_error, r2_score, RegressionMetrics};
pub use node::{Node, NodeType};
pub use schema::{FeatureSchema, SCHEMA_VERSION};
pub use trainer::{train_test_split, FeatureImportance, TrainedModel, Trainer, TrainerConfig, TrainingReport};
pub use tree::{RegressionTree, TreeConfig};

/// Maximum features per sample
pub const MAX_FEATURES: usize = 32;

/// ML error types
#[derive(Debug, thiserror::Error)]
pub enum MLError {
    /// Not enough rows to fit or evaluate
    #[error("Insufficient data: need at least {required} rows, got {available}")]
    InsufficientData {
        /// Rows required
        required: usize,
        /// Rows available
        available: usize,
    },

    /// Feature index outside the sample
    #[error("Invalid feature index {index} for a sample of {len} features")]
    InvalidFeature {
        /// Requested index
        index: usize,
        /// Features in the sample
        len: usize,
    },

    /// More features than a sample can hold
    #[error("Too many features: {count} (maximum {max})")]
    FeatureOverflow {
        /// Features requested
        count: usize,
        /// Capacity
        max: usize,
    },

    /// Configuration that cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dataset rows that failed validation
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// Input or artifact doesn't match the trained feature schema
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Lookup, validation or kinetic failure from the core engine
    #[error(transparent)]
    Engine(#[from] ShelfLifeError),

    /// Dataset generation or CSV failure
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact encoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for ML operations
pub type MLResult<T> = Result<T, MLError>;

/// Feature vector for regression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Feature values; only the first `num_features` are meaningful
    pub features: [f64; MAX_FEATURES],
    /// Number of valid features
    pub num_features: usize,
}

impl Sample {
    /// Create a sample from a slice of features
    pub fn new(features: &[f64]) -> MLResult<Self> {
        if features.len() > MAX_FEATURES {
            return Err(MLError::FeatureOverflow {
                count: features.len(),
                max: MAX_FEATURES,
            });
        }

        let mut sample = Self {
            features: [0.0; MAX_FEATURES],
            num_features: features.len(),
        };
        sample.features[..features.len()].copy_from_slice(features);
        Ok(sample)
    }

    /// Get feature value by index
    pub fn get_feature(&self, index: usize) -> Option<f64> {
        if index < self.num_features {
            Some(self.features[index])
        } else {
            None
        }
    }

    /// Valid features as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.features[..self.num_features]
    }

    /// Number of valid features
    pub fn len(&self) -> usize {
        self.num_features
    }

    /// True when the sample has no features
    pub fn is_empty(&self) -> bool {
        self.num_features == 0
    }
}

/// A fitted model that maps a feature vector to a shelf life in days
pub trait Regressor {
    /// Predict for one sample aligned to the model's feature layout
    fn predict(&self, sample: &Sample) -> MLResult<f64>;

    /// Number of features the model was fitted on
    fn num_features(&self) -> usize;

    /// Predict for many samples, stopping at the first error
    fn predict_batch(&self, samples: &[Sample]) -> MLResult<Vec<f64>> {
        samples.iter().map(|sample| self.predict(sample)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_creation() {
        let sample = Sample::new(&[4.0, 90.0, 1.0]).unwrap();
        assert_eq!(sample.len(), 3);
        assert_eq!(sample.get_feature(1), Some(90.0));
        assert_eq!(sample.get_feature(3), None);
        assert_eq!(sample.as_slice(), &[4.0, 90.0, 1.0]);
    }

    #[test]
    fn test_sample_overflow() {
        let too_many = [0.0; MAX_FEATURES + 1];
        assert!(matches!(
            Sample::new(&too_many),
            Err(MLError::FeatureOverflow { count: 33, max: 32 })
        ));
        assert!(Sample::new(&[0.0; MAX_FEATURES]).is_ok());
    }

    #[test]
    fn test_engine_errors_convert() {
        let err: MLError = ShelfLifeError::unknown_product("durian").into();
        assert!(err.to_string().contains("durian"));
    }
}
