//! Random forest classifier inference.
//!
//! The artifact is JSON that mirrors scikit-learn's fitted `tree_` arrays, so
//! an exported `RandomForestClassifier` can be loaded without Python at
//! inference time.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LEAF: i64 = -1;

/// One fitted decision tree in flat array form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    /// Split feature per node. Ignored on leaves.
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights, one entry per forest class.
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    pub fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF
    }

    fn validate(&self, index: usize, n_features: usize, n_classes: usize) -> Result<()> {
        let n = self.n_nodes();
        let invalid = |msg: String| Error::InvalidModel(format!("tree {}: {}", index, msg));

        if n == 0 {
            return Err(invalid("has no nodes".to_string()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }

        for node in 0..n {
            if self.value[node].len() != n_classes {
                return Err(invalid(format!(
                    "node {} has {} class weights, expected {}",
                    node,
                    self.value[node].len(),
                    n_classes
                )));
            }
            if self.is_leaf(node) {
                continue;
            }

            for child in [self.children_left[node], self.children_right[node]] {
                // Children always come after their parent in the flat layout,
                // which also rules out cycles.
                if child <= node as i64 || child >= n as i64 {
                    return Err(invalid(format!("node {} has bad child {}", node, child)));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(invalid(format!(
                    "node {} splits on feature {} of {}",
                    node, feature, n_features
                )));
            }
        }
        Ok(())
    }

    /// Index of the leaf reached by `x`. Goes left when `x[feature] <= threshold`.
    pub fn leaf_for(&self, x: ArrayView1<f64>) -> usize {
        let mut node = 0usize;
        while !self.is_leaf(node) {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Normalized class distribution at the leaf reached by `x`.
    pub fn predict_proba(&self, x: ArrayView1<f64>) -> Vec<f64> {
        let weights = &self.value[self.leaf_for(x)];
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![1.0 / weights.len() as f64; weights.len()]
        }
    }
}

/// Ensemble of decision trees voting by averaged class probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub classes: Vec<i64>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Parse and validate a forest from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let forest: RandomForest = serde_json::from_str(json)?;
        forest.validate()?;
        Ok(forest)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::InvalidModel("no classes".to_string()));
        }
        if self.trees.is_empty() {
            return Err(Error::InvalidModel("no trees".to_string()));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.n_features, self.classes.len())?;
        }
        Ok(())
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Mean of the per-tree class distributions for one sample.
    pub fn predict_proba_row(&self, x: ArrayView1<f64>) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.predict_proba(x)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        proba
    }

    /// Predicted class and its probability. Ties go to the earlier class.
    pub fn predict_row(&self, x: ArrayView1<f64>) -> (i64, f64) {
        let proba = self.predict_proba_row(x);
        let mut best = 0;
        for (idx, &p) in proba.iter().enumerate().skip(1) {
            if p > proba[best] {
                best = idx;
            }
        }
        (self.classes[best], proba[best])
    }

    fn check_width(&self, features: &Array2<f64>) -> Result<()> {
        if features.ncols() != self.n_features {
            return Err(Error::FeatureMismatch {
                expected: self.n_features,
                actual: features.ncols(),
            });
        }
        Ok(())
    }

    pub fn predict_proba(&self, features: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_width(features)?;
        let mut out = Array2::<f64>::zeros((features.nrows(), self.classes.len()));
        for (row, mut dst) in features.axis_iter(Axis(0)).zip(out.axis_iter_mut(Axis(0))) {
            for (d, p) in dst.iter_mut().zip(self.predict_proba_row(row)) {
                *d = p;
            }
        }
        Ok(out)
    }

    /// One `(class, probability)` pair per row.
    pub fn predict_with_confidence(&self, features: &Array2<f64>) -> Result<Vec<(i64, f64)>> {
        self.check_width(features)?;
        Ok(features
            .axis_iter(Axis(0))
            .map(|row| self.predict_row(row))
            .collect())
    }

    pub fn predict(&self, features: &Array2<f64>) -> Result<Vec<i64>> {
        Ok(self
            .predict_with_confidence(features)?
            .into_iter()
            .map(|(class, _)| class)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_forest, stump};
    use ndarray::array;

    #[test]
    fn test_stump_threshold_is_inclusive_on_the_left() {
        let tree = stump(0, 0.5, [9.0, 1.0], [1.0, 9.0]);
        assert_eq!(tree.leaf_for(array![0.5].view()), 1);
        assert_eq!(tree.leaf_for(array![0.51].view()), 2);
        assert_eq!(tree.predict_proba(array![0.0].view()), vec![0.9, 0.1]);
    }

    #[test]
    fn test_forest_averages_tree_probabilities() {
        let forest = RandomForest {
            classes: vec![0, 1],
            n_features: 2,
            trees: vec![
                stump(0, 0.0, [1.0, 0.0], [0.0, 1.0]),
                stump(1, 0.0, [1.0, 0.0], [1.0, 3.0]),
            ],
        };
        forest.validate().unwrap();

        // tree 1 -> [0, 1]; tree 2 -> [0.25, 0.75]
        let proba = forest.predict_proba_row(array![1.0, 1.0].view());
        assert!((proba[0] - 0.125).abs() < 1e-12);
        assert!((proba[1] - 0.875).abs() < 1e-12);
        assert_eq!(forest.predict_row(array![1.0, 1.0].view()).0, 1);

        // tree 1 -> [1, 0]; tree 2 -> [1, 0]
        assert_eq!(forest.predict_row(array![-1.0, -1.0].view()), (0, 1.0));
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        let forest = RandomForest {
            classes: vec![0, 1],
            n_features: 1,
            trees: vec![stump(0, 0.0, [1.0, 1.0], [1.0, 1.0])],
        };
        assert_eq!(forest.predict_row(array![3.0].view()), (0, 0.5));
    }

    #[test]
    fn test_predict_matrix_and_width_check() {
        let forest = sample_forest();
        let features = Array2::<f64>::zeros((3, forest.n_features));
        let classes = forest.predict(&features).unwrap();
        assert_eq!(classes.len(), 3);
        assert!(classes.iter().all(|c| forest.classes.contains(c)));

        let proba = forest.predict_proba(&features).unwrap();
        for row in proba.axis_iter(Axis(0)) {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }

        let narrow = Array2::<f64>::zeros((1, forest.n_features - 1));
        assert!(matches!(forest.predict(&narrow), Err(Error::FeatureMismatch { .. })));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "classes": [0, 1],
            "n_features": 4,
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [3, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [[10.0, 10.0], [9.0, 1.0], [1.0, 9.0]]
            }]
        }"#;
        let forest = RandomForest::from_json(json).unwrap();
        assert_eq!(forest.n_trees(), 1);
        assert_eq!(forest.predict_row(array![0.0, 0.0, 0.0, 1.0].view()).0, 1);
    }

    #[test]
    fn test_rejects_malformed_trees() {
        let mut bad_feature = sample_forest();
        bad_feature.trees[0].feature[0] = 99;
        assert!(matches!(bad_feature.validate(), Err(Error::InvalidModel(_))));

        let mut bad_child = sample_forest();
        bad_child.trees[0].children_left[0] = 0;
        assert!(matches!(bad_child.validate(), Err(Error::InvalidModel(_))));

        let mut ragged = sample_forest();
        ragged.trees[0].threshold.pop();
        assert!(matches!(ragged.validate(), Err(Error::InvalidModel(_))));

        let mut wrong_classes = sample_forest();
        wrong_classes.trees[0].value[1] = vec![1.0];
        assert!(matches!(wrong_classes.validate(), Err(Error::InvalidModel(_))));

        let empty = RandomForest {
            classes: vec![0, 1],
            n_features: 11,
            trees: Vec::new(),
        };
        assert!(matches!(empty.validate(), Err(Error::InvalidModel(_))));
    }

    #[test]
    fn test_save_and_load() {
        let forest = sample_forest();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forest.json");
        forest.save(&path).unwrap();

        let loaded = RandomForest::load(&path).unwrap();
        assert_eq!(loaded.classes, forest.classes);
        assert_eq!(loaded.trees[0].children_left, forest.trees[0].children_left);
        assert_eq!(loaded.n_trees(), forest.n_trees());
    }
}
