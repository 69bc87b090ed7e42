//! Regressor training
//!
//! Encodes a dataset, holds out a shuffled test split, fits the random
//! forest on the rest and reports held-out error and feature importances.
//!
//! ```text
//! Dataset ─▶ validate ─▶ encode ─▶ split 80/20 ─▶ fit forest ─▶ evaluate
//!                                                     │
//!                                                     ▼
//!                                         TrainedModel (schema + forest)
//! ```

use log::{info, warn};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};
use shelflife_dataset::{validate_dataset, Dataset};

use crate::{
    FeatureEncoder, FeatureSchema, ForestConfig, MLError, MLResult, RandomForest, RegressionMetrics, Regressor,
    Sample,
};

/// Training configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Fraction of rows held out for evaluation
    pub test_fraction: f64,
    /// Seed for the train/test shuffle
    pub split_seed: u64,
    /// Forest to fit
    pub forest: ForestConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            split_seed: 42,
            forest: ForestConfig::default(),
        }
    }
}

impl TrainerConfig {
    /// Check the configuration before training
    pub fn validate(&self) -> MLResult<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(MLError::InvalidConfig(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        self.forest.validate()
    }
}

/// Importance of one named feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    /// Column name, e.g. `Temperature_C`
    pub name: String,
    /// Share of the total impurity reduction
    pub importance: f64,
}

/// Outcome of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Rows the forest was fitted on
    pub train_rows: usize,
    /// Rows held out for evaluation
    pub test_rows: usize,
    /// Held-out mean absolute error (days)
    pub mae: f64,
    /// Held-out root mean squared error (days)
    pub rmse: f64,
    /// Held-out coefficient of determination
    pub r2: f64,
    /// Feature importances, most important first
    pub feature_importances: Vec<FeatureImportance>,
}

impl TrainingReport {
    /// The `n` most important features
    pub fn top_features(&self, n: usize) -> &[FeatureImportance] {
        &self.feature_importances[..n.min(self.feature_importances.len())]
    }
}

/// A fitted forest with the schema its inputs must follow
///
/// Immutable once built; share it by reference or `Arc` across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    pub(crate) schema: FeatureSchema,
    pub(crate) forest: RandomForest,
}

impl TrainedModel {
    /// Pair a fitted forest with its schema, checking they agree
    pub fn new(schema: FeatureSchema, forest: RandomForest) -> MLResult<Self> {
        schema.validate()?;
        forest.check_structure()?;
        if forest.num_features() != schema.num_features() {
            return Err(MLError::SchemaMismatch(format!(
                "forest has {} features, schema {}",
                forest.num_features(),
                schema.num_features()
            )));
        }
        Ok(Self { schema, forest })
    }

    /// Feature schema
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Fitted forest
    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    /// Encoder for this model's schema
    pub fn encoder(&self) -> MLResult<FeatureEncoder> {
        FeatureEncoder::new(self.schema.clone())
    }

    /// Predict shelf life (days) for a storage condition
    pub fn predict_conditions(&self, product: &str, temperature_c: f64, humidity_pct: f64) -> MLResult<f64> {
        let sample = self.encoder()?.encode(product, temperature_c, humidity_pct)?;
        self.forest.predict(&sample)
    }
}

impl Regressor for TrainedModel {
    fn predict(&self, sample: &Sample) -> MLResult<f64> {
        self.forest.predict(sample)
    }

    fn num_features(&self) -> usize {
        self.schema.num_features()
    }
}

/// Shuffled split of `0..n` into `(train, test)` row indices
///
/// The test side gets `ceil(test_fraction · n)` rows.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let test_rows = ((test_fraction * n as f64).ceil() as usize).min(n);
    let train = indices.split_off(test_rows);
    (train, indices)
}

/// Fits forests from datasets
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    /// Create a trainer, validating the configuration
    pub fn new(config: TrainerConfig) -> MLResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train on a dataset and evaluate on a held-out split
    pub fn train(&self, dataset: &Dataset) -> MLResult<(TrainedModel, TrainingReport)> {
        if dataset.len() < 2 {
            return Err(MLError::InsufficientData {
                required: 2,
                available: dataset.len(),
            });
        }

        let validation = validate_dataset(dataset);
        if let Some(message) = validation.first_error() {
            return Err(MLError::InvalidDataset(format!(
                "{} ({} errors)",
                message,
                validation.errors.len()
            )));
        }
        for issue in &validation.warnings {
            warn!("{}", issue.message);
        }

        let encoder = FeatureEncoder::fit(dataset)?;
        let (samples, targets) = encoder.encode_dataset(dataset)?;

        let (train_idx, test_idx) = train_test_split(samples.len(), self.config.test_fraction, self.config.split_seed);
        if train_idx.is_empty() {
            return Err(MLError::InsufficientData {
                required: 2,
                available: dataset.len(),
            });
        }

        let pick = |idx: &[usize]| -> (Vec<Sample>, Vec<f64>) {
            idx.iter().map(|&i| (samples[i], targets[i])).unzip()
        };
        let (train_x, train_y) = pick(&train_idx);
        let (test_x, test_y) = pick(&test_idx);

        info!(
            "training on {} rows, evaluating on {} ({} features: {})",
            train_x.len(),
            test_x.len(),
            encoder.schema().num_features(),
            encoder.schema().feature_names().join(", ")
        );

        let mut forest = RandomForest::new(self.config.forest);
        forest.fit(&train_x, &train_y)?;

        let predictions = forest.predict_batch(&test_x)?;
        let metrics = RegressionMetrics::evaluate(&test_y, &predictions)?;

        let mut feature_importances: Vec<FeatureImportance> = encoder
            .schema()
            .feature_names()
            .into_iter()
            .zip(forest.feature_importances())
            .map(|(name, importance)| FeatureImportance { name, importance })
            .collect();
        feature_importances.sort_by(|a, b| b.importance.total_cmp(&a.importance));

        info!("held-out MAE {:.3} days, R² {:.4}", metrics.mae, metrics.r2);

        let report = TrainingReport {
            train_rows: train_x.len(),
            test_rows: test_x.len(),
            mae: metrics.mae,
            rmse: metrics.rmse,
            r2: metrics.r2,
            feature_importances,
        };
        let model = TrainedModel::new(encoder.into_schema(), forest)?;
        Ok((model, report))
    }
}
