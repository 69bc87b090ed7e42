//! Random Forest regression
//!
//! Combines many regression trees, each fitted on a bootstrap resample of
//! the training rows, and averages their predictions.
//!
//! Every tree draws from its own `StdRng` seeded with `seed + tree_index`,
//! so a forest is reproducible from its configuration alone and a tree's
//! randomness does not depend on how many draws earlier trees made.

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{tree::check_training_data, MLError, MLResult, Regressor, RegressionTree, Sample, TreeConfig};

/// Configuration for the random forest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub num_trees: usize,
    /// Fit each tree on a bootstrap resample instead of all rows
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
    /// Per-tree growth limits
    pub tree: TreeConfig,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            num_trees: 150,
            bootstrap: true,
            seed: 42,
            tree: TreeConfig::default(),
        }
    }
}

impl ForestConfig {
    /// Check the configuration can grow a forest
    pub fn validate(&self) -> MLResult<()> {
        if self.num_trees == 0 {
            return Err(MLError::InvalidConfig("forest needs at least one tree".to_string()));
        }
        self.tree.validate()
    }
}

/// Random forest regressor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    /// Individual trees
    trees: Vec<RegressionTree>,
    /// Configuration
    config: ForestConfig,
    /// Features per sample
    num_features: usize,
    /// Number of samples used for training
    num_samples: usize,
}

impl RandomForest {
    /// Create an unfitted forest
    pub fn new(config: ForestConfig) -> Self {
        Self {
            trees: Vec::new(),
            config,
            num_features: 0,
            num_samples: 0,
        }
    }

    /// Train the forest on samples
    pub fn fit(&mut self, samples: &[Sample], targets: &[f64]) -> MLResult<()> {
        self.config.validate()?;
        check_training_data(samples, targets)?;

        let n = samples.len();
        self.num_samples = n;
        self.num_features = samples[0].len();
        self.trees.clear();

        info!(
            "fitting {} trees on {} rows x {} features",
            self.config.num_trees, n, self.num_features
        );

        for i in 0..self.config.num_trees {
            let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(i as u64));

            let indices: Vec<usize> = if self.config.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };

            let mut tree = RegressionTree::new(self.config.tree);
            tree.fit_indices(samples, targets, indices, &mut rng)?;
            debug!("tree {}: {} nodes, depth {}", i, tree.node_count(), tree.depth());
            self.trees.push(tree);
        }

        Ok(())
    }

    /// Trees in the forest
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    /// Configuration the forest was built with
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// True once fitted
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Impurity-based feature importances, summing to 1
    ///
    /// Each tree's importances are normalized before averaging, so deep
    /// trees don't dominate. All zeros when no tree ever split.
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.num_features];

        for tree in &self.trees {
            let raw = tree.feature_importances();
            let sum: f64 = raw.iter().sum();
            if sum > 0.0 {
                for (total, value) in totals.iter_mut().zip(raw) {
                    *total += value / sum;
                }
            }
        }

        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            totals.iter_mut().for_each(|v| *v /= sum);
        }
        totals
    }

    /// Check a deserialized forest is usable
    pub fn check_structure(&self) -> MLResult<()> {
        if self.trees.is_empty() {
            return Err(MLError::SchemaMismatch("forest has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            if tree.num_features() != self.num_features {
                return Err(MLError::SchemaMismatch(format!(
                    "tree {} expects {} features, forest {}",
                    i,
                    tree.num_features(),
                    self.num_features
                )));
            }
            tree.check_structure()?;
        }
        Ok(())
    }

    /// Get forest statistics
    pub fn stats(&self) -> ForestStats {
        ForestStats {
            num_trees: self.trees.len(),
            total_nodes: self.trees.iter().map(|t| t.node_count()).sum(),
            max_depth: self.trees.iter().map(|t| t.depth()).max().unwrap_or(0),
            num_samples: self.num_samples,
            num_features: self.num_features,
        }
    }
}

impl Regressor for RandomForest {
    fn predict(&self, sample: &Sample) -> MLResult<f64> {
        if self.trees.is_empty() {
            return Err(MLError::InsufficientData {
                required: 1,
                available: 0,
            });
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict(sample)?;
        }
        Ok(total / self.trees.len() as f64)
    }

    fn num_features(&self) -> usize {
        self.num_features
    }
}

/// Forest statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestStats {
    /// Number of trees
    pub num_trees: usize,
    /// Total nodes across all trees
    pub total_nodes: usize,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Number of training samples
    pub num_samples: usize,
    /// Features per sample
    pub num_features: usize,
}
