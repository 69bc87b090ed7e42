//! Regression tree node implementation
//!
//! Nodes live in a flat vector and refer to their children by index, so a
//! tree serializes as a plain list and prediction is a loop, not recursion.

use serde::{Deserialize, Serialize};

use crate::{MLError, MLResult, Sample};

/// Node type in the regression tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeType {
    /// Internal node with split condition
    Internal {
        /// Feature index to split on
        feature: usize,
        /// Samples with `x[feature] <= threshold` go left
        threshold: f64,
        /// Left child index
        left: usize,
        /// Right child index
        right: usize,
        /// Reduction in summed squared error achieved by the split
        impurity_decrease: f64,
    },
    /// Leaf node holding the mean target of its samples
    Leaf {
        /// Predicted value
        value: f64,
    },
}

/// Tree node with bookkeeping for statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node type and data
    pub node_type: NodeType,
    /// Distance from the root
    pub depth: usize,
    /// Training rows that reached this node
    pub samples: usize,
}

impl Node {
    /// Create an internal node
    pub fn internal(
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        impurity_decrease: f64,
        samples: usize,
        depth: usize,
    ) -> Self {
        Self {
            node_type: NodeType::Internal {
                feature,
                threshold,
                left,
                right,
                impurity_decrease,
            },
            depth,
            samples,
        }
    }

    /// Create a leaf node
    pub fn leaf(value: f64, samples: usize, depth: usize) -> Self {
        Self {
            node_type: NodeType::Leaf { value },
            depth,
            samples,
        }
    }

    /// Check if node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self.node_type, NodeType::Leaf { .. })
    }

    /// Leaf value, `None` for internal nodes
    pub fn value(&self) -> Option<f64> {
        match self.node_type {
            NodeType::Leaf { value } => Some(value),
            NodeType::Internal { .. } => None,
        }
    }

    /// Traverse to next node based on sample
    ///
    /// Returns the child index to visit next
    pub fn traverse(&self, sample: &Sample) -> MLResult<usize> {
        match self.node_type {
            NodeType::Internal {
                feature,
                threshold,
                left,
                right,
                ..
            } => {
                let value = sample.get_feature(feature).ok_or(MLError::InvalidFeature {
                    index: feature,
                    len: sample.len(),
                })?;

                if value <= threshold {
                    Ok(left)
                } else {
                    Ok(right)
                }
            }
            NodeType::Leaf { .. } => Err(MLError::InvalidConfig(
                "cannot traverse from a leaf node".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let internal = Node::internal(0, 25.0, 1, 2, 4.0, 10, 3);
        assert!(!internal.is_leaf());
        assert_eq!(internal.depth, 3);
        assert_eq!(internal.value(), None);

        let leaf = Node::leaf(12.5, 4, 5);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.value(), Some(12.5));
        assert_eq!(leaf.samples, 4);
    }

    #[test]
    fn test_node_traverse() {
        let node = Node::internal(0, 25.0, 1, 2, 1.0, 2, 0);

        let sample1 = Sample::new(&[20.0]).unwrap();
        assert_eq!(node.traverse(&sample1).unwrap(), 1);

        // Ties go left
        let tie = Sample::new(&[25.0]).unwrap();
        assert_eq!(node.traverse(&tie).unwrap(), 1);

        let sample2 = Sample::new(&[30.0]).unwrap();
        assert_eq!(node.traverse(&sample2).unwrap(), 2);
    }

    #[test]
    fn test_traverse_errors() {
        let node = Node::internal(3, 0.5, 1, 2, 1.0, 2, 0);
        let short = Sample::new(&[1.0, 2.0]).unwrap();
        assert!(matches!(node.traverse(&short), Err(MLError::InvalidFeature { index: 3, len: 2 })));

        let leaf = Node::leaf(1.0, 1, 0);
        assert!(leaf.traverse(&short).is_err());
    }
}
