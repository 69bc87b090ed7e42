//! Regression tree implementation
//!
//! CART for regression: each node picks the split that most reduces the
//! summed squared error of its rows, and leaves predict the mean target.
//! Trees are built recursively by partitioning row indices, so bootstrap
//! resamples (with repeated rows) need no copying of samples.

use rand::{seq::index, Rng};
use serde::{Deserialize, Serialize};

use crate::{MLError, MLResult, Node, NodeType, Regressor, Sample};

/// Nodes whose summed squared error is below this are pure
const PURE_NODE_SSE: f64 = 1e-12;

/// Configuration for a regression tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of tree, `None` grows until leaves are pure
    pub max_depth: Option<usize>,
    /// Minimum rows required to split a node
    pub min_samples_split: usize,
    /// Minimum rows on each side of a split
    pub min_samples_leaf: usize,
    /// Features considered per split, `None` considers all
    pub max_features: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }
}

impl TreeConfig {
    /// Check the configuration can grow a tree
    pub fn validate(&self) -> MLResult<()> {
        if self.min_samples_split < 2 {
            return Err(MLError::InvalidConfig("min_samples_split must be at least 2".to_string()));
        }
        if self.min_samples_leaf == 0 {
            return Err(MLError::InvalidConfig("min_samples_leaf must be at least 1".to_string()));
        }
        if self.max_features == Some(0) {
            return Err(MLError::InvalidConfig("max_features must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Best split found for a node
#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    impurity_decrease: f64,
}

/// Regression tree structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    /// Tree nodes in array representation, root first
    nodes: Vec<Node>,
    /// Configuration
    config: TreeConfig,
    /// Features per sample seen during fitting
    num_features: usize,
}

impl RegressionTree {
    /// Create an unfitted tree
    pub fn new(config: TreeConfig) -> Self {
        Self {
            nodes: Vec::new(),
            config,
            num_features: 0,
        }
    }

    /// Fit the tree on every row
    pub fn fit<R: Rng + ?Sized>(&mut self, samples: &[Sample], targets: &[f64], rng: &mut R) -> MLResult<()> {
        let indices: Vec<usize> = (0..samples.len()).collect();
        self.fit_indices(samples, targets, indices, rng)
    }

    /// Fit the tree on the rows named by `indices`, repeats allowed
    pub fn fit_indices<R: Rng + ?Sized>(
        &mut self,
        samples: &[Sample],
        targets: &[f64],
        mut indices: Vec<usize>,
        rng: &mut R,
    ) -> MLResult<()> {
        self.config.validate()?;
        check_training_data(samples, targets)?;
        if indices.is_empty() {
            return Err(MLError::InsufficientData {
                required: 1,
                available: 0,
            });
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= samples.len()) {
            return Err(MLError::InvalidConfig(format!(
                "row index {} outside {} training rows",
                bad,
                samples.len()
            )));
        }

        self.num_features = samples[0].len();
        self.nodes.clear();
        self.build(samples, targets, &mut indices, 0, rng);
        Ok(())
    }

    /// Grow the subtree for `indices` and return its root index
    fn build<R: Rng + ?Sized>(
        &mut self,
        samples: &[Sample],
        targets: &[f64],
        indices: &mut [usize],
        depth: usize,
        rng: &mut R,
    ) -> usize {
        let node_index = self.nodes.len();
        let n = indices.len();
        let (sum, sum_sq) = indices.iter().fold((0.0, 0.0), |(s, sq), &i| (s + targets[i], sq + targets[i] * targets[i]));
        let mean = sum / n as f64;
        let sse = sum_sq - sum * sum / n as f64;

        let at_depth_limit = self.config.max_depth.map_or(false, |max| depth >= max);
        let too_small = n < self.config.min_samples_split || n < 2 * self.config.min_samples_leaf;

        if at_depth_limit || too_small || sse <= PURE_NODE_SSE {
            self.nodes.push(Node::leaf(mean, n, depth));
            return node_index;
        }

        let split = match self.best_split(samples, targets, indices, sse, rng) {
            Some(split) => split,
            None => {
                self.nodes.push(Node::leaf(mean, n, depth));
                return node_index;
            }
        };

        // Reserve the slot, children are appended after it
        self.nodes.push(Node::leaf(mean, n, depth));

        let boundary = partition(indices, |i| samples[i].features[split.feature] <= split.threshold);
        let (left_rows, right_rows) = indices.split_at_mut(boundary);

        let left = self.build(samples, targets, left_rows, depth + 1, rng);
        let right = self.build(samples, targets, right_rows, depth + 1, rng);

        self.nodes[node_index] = Node::internal(
            split.feature,
            split.threshold,
            left,
            right,
            split.impurity_decrease,
            n,
            depth,
        );
        node_index
    }

    /// Find the split with the largest squared-error reduction
    fn best_split<R: Rng + ?Sized>(
        &self,
        samples: &[Sample],
        targets: &[f64],
        indices: &[usize],
        parent_sse: f64,
        rng: &mut R,
    ) -> Option<Split> {
        let candidates: Vec<usize> = match self.config.max_features {
            Some(k) if k < self.num_features => index::sample(rng, self.num_features, k).into_vec(),
            _ => (0..self.num_features).collect(),
        };

        let min_leaf = self.config.min_samples_leaf;
        let n = indices.len();
        let mut order = indices.to_vec();
        let mut best: Option<Split> = None;

        for feature in candidates {
            let value = |i: usize| samples[i].features[feature];
            order.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

            let total: f64 = order.iter().map(|&i| targets[i]).sum();
            let total_sq: f64 = order.iter().map(|&i| targets[i] * targets[i]).sum();
            let mut left_sum = 0.0;
            let mut left_sq = 0.0;

            for position in 0..n - 1 {
                let row = order[position];
                left_sum += targets[row];
                left_sq += targets[row] * targets[row];

                let left_n = position + 1;
                let right_n = n - left_n;
                if left_n < min_leaf || right_n < min_leaf {
                    continue;
                }

                let current = value(row);
                let next = value(order[position + 1]);
                if current >= next {
                    continue;
                }

                let right_sum = total - left_sum;
                let right_sq = total_sq - left_sq;
                let child_sse = (left_sq - left_sum * left_sum / left_n as f64)
                    + (right_sq - right_sum * right_sum / right_n as f64);
                let decrease = parent_sse - child_sse;

                if decrease > best.map_or(0.0, |b| b.impurity_decrease) {
                    let mut threshold = current + (next - current) / 2.0;
                    // Midpoint can round up to `next` for adjacent floats
                    if threshold >= next {
                        threshold = current;
                    }
                    best = Some(Split {
                        feature,
                        threshold,
                        impurity_decrease: decrease,
                    });
                }
            }
        }

        best
    }

    /// Borrow the nodes, root first
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Configuration the tree was built with
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Get the number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Get tree depth
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// True once fitted
    pub fn is_fitted(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Summed squared-error reduction per feature (unnormalized)
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut importances = vec![0.0; self.num_features];
        for node in &self.nodes {
            if let NodeType::Internal {
                feature,
                impurity_decrease,
                ..
            } = node.node_type
            {
                if let Some(slot) = importances.get_mut(feature) {
                    *slot += impurity_decrease;
                }
            }
        }
        importances
    }

    /// Check node links and feature indices after deserialization
    pub fn check_structure(&self) -> MLResult<()> {
        if self.nodes.is_empty() {
            return Err(MLError::SchemaMismatch("tree has no nodes".to_string()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node.node_type {
                NodeType::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    // Children are always stored after their parent
                    let links_ok = left > index && right > index && left < self.nodes.len() && right < self.nodes.len();
                    if !links_ok || feature >= self.num_features || !threshold.is_finite() {
                        return Err(MLError::SchemaMismatch(format!("malformed tree node {}", index)));
                    }
                }
                NodeType::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(MLError::SchemaMismatch(format!("leaf {} has non-finite value", index)));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Regressor for RegressionTree {
    fn predict(&self, sample: &Sample) -> MLResult<f64> {
        if self.nodes.is_empty() {
            return Err(MLError::InsufficientData {
                required: 1,
                available: 0,
            });
        }
        if sample.len() != self.num_features {
            return Err(MLError::SchemaMismatch(format!(
                "sample has {} features, tree expects {}",
                sample.len(),
                self.num_features
            )));
        }

        // A root-to-leaf path visits each node at most once
        let mut current = 0;
        for _ in 0..self.nodes.len() {
            let node = &self.nodes[current];
            match node.node_type {
                NodeType::Leaf { value } => return Ok(value),
                NodeType::Internal { .. } => {
                    current = node.traverse(sample)?;
                    if current >= self.nodes.len() {
                        return Err(MLError::SchemaMismatch(format!("dangling child index {}", current)));
                    }
                }
            }
        }
        Err(MLError::SchemaMismatch("tree walk did not reach a leaf".to_string()))
    }

    fn num_features(&self) -> usize {
        self.num_features
    }
}

/// Validate rows and targets before fitting
pub(crate) fn check_training_data(samples: &[Sample], targets: &[f64]) -> MLResult<()> {
    if samples.is_empty() {
        return Err(MLError::InsufficientData {
            required: 1,
            available: 0,
        });
    }
    if samples.len() != targets.len() {
        return Err(MLError::InvalidConfig(format!(
            "{} samples but {} targets",
            samples.len(),
            targets.len()
        )));
    }

    let width = samples[0].len();
    if width == 0 {
        return Err(MLError::InvalidFeature { index: 0, len: 0 });
    }
    if let Some(row) = samples.iter().position(|s| s.len() != width) {
        return Err(MLError::SchemaMismatch(format!(
            "row {} has {} features, expected {}",
            row,
            samples[row].len(),
            width
        )));
    }
    if let Some(row) = samples.iter().position(|s| s.as_slice().iter().any(|v| !v.is_finite())) {
        return Err(MLError::InvalidDataset(format!("row {} has a non-finite feature", row)));
    }
    if let Some(row) = targets.iter().position(|t| !t.is_finite()) {
        return Err(MLError::InvalidDataset(format!("target {} is not finite", row)));
    }
    Ok(())
}

/// Move rows satisfying `goes_left` to the front, returning how many there are
fn partition<F: Fn(usize) -> bool>(indices: &mut [usize], goes_left: F) -> usize {
    let mut boundary = 0;
    for i in 0..indices.len() {
        if goes_left(indices[i]) {
            indices.swap(i, boundary);
            boundary += 1;
        }
    }
    boundary
}
