// ============================================================
// Layer 5 — Random Forest Classifier
// ============================================================
// A bagged ensemble of CART trees.
//
//   fit:
//     classes      = sorted distinct training labels
//     tree seeds   = drawn in order from StdRng(seed)
//     for each tree (in parallel):
//       bootstrap  = n draws with replacement
//       grow       = DecisionTree with sqrt(n_features)
//                    candidate features per split
//
//   predict_proba(x) = mean over trees of the leaf distribution
//
// Each tree owns its own RNG seeded from the master sequence and
// rayon collects results in index order, so a parallel fit is
// identical to a sequential one for the same seed.

use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SymptomError};
use crate::ml::tree::{DecisionTree, TreeParams};

/// Hyperparameters for the forest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub seed: u64,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    /// Closed label set; position = class index
    classes: Vec<String>,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit the ensemble on feature rows `x` with string labels.
    pub fn fit(x: &[Vec<f64>], labels: &[String], config: &ForestConfig) -> Result<Self> {
        if x.is_empty() {
            return Err(SymptomError::data_format("cannot fit a forest on zero rows"));
        }
        if x.len() != labels.len() {
            return Err(SymptomError::data_format(format!(
                "{} feature rows but {} labels",
                x.len(),
                labels.len()
            )));
        }
        let n_features = x[0].len();
        if x.iter().any(|row| row.len() != n_features) {
            return Err(SymptomError::data_format("feature rows differ in length"));
        }

        let mut classes: Vec<String> = labels.to_vec();
        classes.sort();
        classes.dedup();

        // binary_search is safe: every label is in `classes`
        let y: Vec<usize> = labels
            .iter()
            .map(|l| classes.binary_search(l).unwrap_or_default())
            .collect();

        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            max_features: ((n_features as f64).sqrt() as usize).max(1),
        };

        let mut master = StdRng::seed_from_u64(config.seed);
        let seeds: Vec<u64> = (0..config.n_estimators.max(1)).map(|_| master.gen()).collect();

        let n_rows = x.len();
        let n_classes = classes.len();
        let trees: Vec<DecisionTree> = seeds
            .into_par_iter()
            .map(|tree_seed| {
                let mut rng = StdRng::seed_from_u64(tree_seed);
                let bootstrap: Vec<usize> =
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
                DecisionTree::fit(x, &y, bootstrap, n_classes, params, &mut rng)
            })
            .collect();

        tracing::info!(
            "Random forest fitted: {} trees, {} classes, {} features, {} max features per split",
            trees.len(),
            n_classes,
            n_features,
            params.max_features,
        );

        Ok(Self {
            classes,
            n_features,
            trees,
        })
    }

    /// Mean class distribution over all trees, indexed like `classes()`.
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.predict_proba(features)) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len().max(1) as f64;
        for p in &mut proba {
            *p /= n_trees;
        }
        proba
    }

    /// Most probable label; ties go to the lower class index.
    pub fn predict(&self, features: &[f64]) -> &str {
        let proba = self.predict_proba(features);
        let mut best = 0;
        for (i, &p) in proba.iter().enumerate() {
            if p > proba[best] {
                best = i;
            }
        }
        &self.classes[best]
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Structural check for a forest read back from disk.
    pub(crate) fn is_consistent(&self) -> bool {
        !self.classes.is_empty()
            && !self.trees.is_empty()
            && self.trees.iter().all(|t| t.is_consistent(self.n_features))
    }
}

/// Fraction of rows whose predicted label equals the true label.
/// `None` when there is nothing to evaluate.
pub fn accuracy(forest: &RandomForest, x: &[Vec<f64>], labels: &[String]) -> Option<f64> {
    if x.is_empty() {
        return None;
    }
    let correct = x
        .iter()
        .zip(labels)
        .filter(|(row, label)| forest.predict(row) == label.as_str())
        .count();
    Some(correct as f64 / x.len() as f64)
}
