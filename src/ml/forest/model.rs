use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ml::Regressor;

/// Child index marking a leaf node.
pub const LEAF: i64 = -1;

/// Errors raised while loading or validating a forest artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact file could not be read.
    #[error("Failed to read model {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The artifact is not valid forest JSON.
    #[error("Failed to parse model {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The forest could not be encoded as JSON.
    #[error("Failed to encode model for {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The artifact could not be written.
    #[error("Failed to write model {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The forest contains no trees.
    #[error("Model contains no trees")]
    NoTrees,
    /// `feature_names` length disagrees with `n_features`.
    #[error("Model declares {names} feature names but n_features is {n_features}")]
    FeatureNameCount { names: usize, n_features: usize },
    /// A tree violates a structural invariant.
    #[error("Tree {tree}: {reason}")]
    InvalidTree { tree: usize, reason: String },
}

/// One fitted regression tree in array form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    /// Left child per node, or [`LEAF`].
    pub children_left: Vec<i64>,
    /// Right child per node, or [`LEAF`].
    pub children_right: Vec<i64>,
    /// Split feature per node. Ignored for leaves.
    pub feature: Vec<i64>,
    /// Split threshold per node. Ignored for leaves.
    pub threshold: Vec<f64>,
    /// Node output. Only leaf values are ever returned.
    pub value: Vec<f64>,
}

impl RegressionTree {
    /// Single-leaf tree that always predicts `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            children_left: vec![LEAF],
            children_right: vec![LEAF],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![value],
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    /// Check that every path from the root ends in a leaf inside the arrays.
    ///
    /// Children must have a larger index than their parent, which rules out
    /// cycles and keeps traversal bounded by `node_count`.
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.value.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_left.len() != n
            || self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
        {
            return Err(format!(
                "node arrays disagree in length (left {}, right {}, feature {}, threshold {}, value {n})",
                self.children_left.len(),
                self.children_right.len(),
                self.feature.len(),
                self.threshold.len(),
            ));
        }
        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {node} has exactly one child"));
                }
                if !self.value[node].is_finite() {
                    return Err(format!("leaf {node} has a non-finite value"));
                }
                continue;
            }
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {node} points at invalid child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!(
                    "node {node} splits on feature {feature}, expected 0..{n_features}"
                ));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {node} has a NaN threshold"));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return its value.
    ///
    /// Panics on a tree that fails [`RegressionTree::validate`]; loaded
    /// models are always validated.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == LEAF {
                return self.value[node];
            }
            let feature = self.feature[node] as usize;
            // Inputs are compared in single precision, as they were during fitting.
            let x = row.get(feature).copied().unwrap_or(0.0) as f32;
            node = if f64::from(x) <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

/// Averaging ensemble of regression trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    /// Artifact format version.
    #[serde(default = "default_model_version")]
    pub model_version: i64,
    /// Number of input features each row must carry.
    pub n_features: usize,
    /// Column names seen at fit time, in order, when the trainer recorded them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// Ensemble members.
    pub trees: Vec<RegressionTree>,
}

fn default_model_version() -> i64 {
    1
}

impl RandomForestRegressor {
    /// Build and validate a forest.
    pub fn new(
        n_features: usize,
        feature_names: Option<Vec<String>>,
        trees: Vec<RegressionTree>,
    ) -> Result<Self, ModelError> {
        let model = Self {
            model_version: default_model_version(),
            n_features,
            feature_names,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    /// Validate structural invariants of the forest.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::NoTrees);
        }
        if let Some(names) = &self.feature_names
            && names.len() != self.n_features
        {
            return Err(ModelError::FeatureNameCount {
                names: names.len(),
                n_features: self.n_features,
            });
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|reason| ModelError::InvalidTree {
                    tree: tree_idx,
                    reason,
                })?;
        }
        Ok(())
    }

    /// Load and validate a forest from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Write the forest as JSON.
    pub fn save_json(&self, path: &Path) -> Result<(), ModelError> {
        let bytes = serde_json::to_vec(self).map_err(|source| ModelError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, bytes).map_err(|source| ModelError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Total node count across all trees.
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(RegressionTree::node_count).sum()
    }
}

impl Regressor for RandomForestRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let mut sum = 0.0f64;
        for tree in &self.trees {
            sum += tree.predict(row);
        }
        sum / self.trees.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Splits on feature 0 at 5.0, then on feature 1 at 0.5 on the right.
    fn two_level_tree() -> RegressionTree {
        RegressionTree {
            children_left: vec![1, LEAF, 3, LEAF, LEAF],
            children_right: vec![2, LEAF, 4, LEAF, LEAF],
            feature: vec![0, -2, 1, -2, -2],
            threshold: vec![5.0, -2.0, 0.5, -2.0, -2.0],
            value: vec![50.0, 10.0, 70.0, 40.0, 100.0],
        }
    }

    #[test]
    fn tree_routes_rows_to_leaves() {
        let tree = two_level_tree();
        assert_eq!(tree.predict(&[1.0, 0.0]), 10.0);
        assert_eq!(tree.predict(&[5.0, 9.0]), 10.0);
        assert_eq!(tree.predict(&[6.0, 0.5]), 40.0);
        assert_eq!(tree.predict(&[6.0, 0.6]), 100.0);
    }

    #[test]
    fn split_compares_in_single_precision() {
        // 0.1f32 widened to f64 is slightly above 0.1, so an f64 threshold of
        // 0.1 sends the row right once the input is narrowed.
        let tree = RegressionTree {
            children_left: vec![1, LEAF, LEAF],
            children_right: vec![2, LEAF, LEAF],
            feature: vec![0, -2, -2],
            threshold: vec![0.1, -2.0, -2.0],
            value: vec![0.0, 1.0, 2.0],
        };
        assert_eq!(tree.predict(&[0.1]), 2.0);
        assert_eq!(tree.predict(&[0.099]), 1.0);
    }

    #[test]
    fn forest_averages_tree_outputs() {
        let forest = RandomForestRegressor::new(
            2,
            None,
            vec![two_level_tree(), RegressionTree::constant(30.0)],
        )
        .unwrap();
        assert_eq!(forest.predict_row(&[1.0, 0.0]), 20.0);
        assert_eq!(forest.predict_row(&[6.0, 1.0]), 65.0);
        assert_eq!(forest.node_count(), 6);
    }

    #[test]
    fn validate_rejects_backward_children() {
        let mut tree = two_level_tree();
        tree.children_left[2] = 2;
        let err = RandomForestRegressor::new(2, None, vec![tree]).unwrap_err();
        assert!(matches!(err, ModelError::InvalidTree { tree: 0, .. }));
    }

    #[test]
    fn validate_rejects_out_of_range_feature() {
        let mut tree = two_level_tree();
        tree.feature[0] = 2;
        assert!(tree.validate(2).is_err());
        assert!(tree.validate(3).is_ok());
    }

    #[test]
    fn validate_rejects_ragged_arrays_and_half_leaves() {
        let mut ragged = two_level_tree();
        ragged.threshold.pop();
        assert!(ragged.validate(2).is_err());

        let mut half_leaf = two_level_tree();
        half_leaf.children_right[1] = 3;
        assert!(half_leaf.validate(2).is_err());
    }

    #[test]
    fn empty_forest_and_name_mismatch_are_rejected() {
        assert!(matches!(
            RandomForestRegressor::new(2, None, Vec::new()),
            Err(ModelError::NoTrees)
        ));
        assert!(matches!(
            RandomForestRegressor::new(
                2,
                Some(vec!["only_one".into()]),
                vec![RegressionTree::constant(1.0)]
            ),
            Err(ModelError::FeatureNameCount {
                names: 1,
                n_features: 2
            })
        ));
    }

    #[test]
    fn load_json_validates_and_reports_paths() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("model.json");
        let forest =
            RandomForestRegressor::new(2, None, vec![two_level_tree()]).unwrap();
        forest.save_json(&good).unwrap();
        assert_eq!(RandomForestRegressor::load_json(&good).unwrap(), forest);

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{\"n_features\": 2").unwrap();
        match RandomForestRegressor::load_json(&broken) {
            Err(ModelError::Parse { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected parse error, got {other:?}"),
        }

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "{\"n_features\": 2, \"trees\": []}").unwrap();
        assert!(matches!(
            RandomForestRegressor::load_json(&empty),
            Err(ModelError::NoTrees)
        ));
    }
}
