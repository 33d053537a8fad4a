// ============================================================
// Layer 5 — CART Decision Tree
// ============================================================
// A classification tree grown with Gini impurity. The forest
// fits many of these on bootstrap samples; on its own a tree
// is just a map from a feature vector to a class distribution.
//
// Growing a node:
//   1. Stop and emit a leaf if the node is pure, has fewer than
//      `min_samples_split` samples, or hit `max_depth`.
//   2. Visit features in a random order. Constant features are
//      skipped; stop after `max_features` non-constant ones.
//   3. For each visited feature, sort the node's samples by value
//      and try a threshold between every pair of distinct
//      neighbouring values. Keep the split with the lowest
//      weighted child Gini.
//   4. Samples with value <= threshold go left, the rest right.
//
// Leaves store the class distribution of their samples, so
// `predict_proba` of a tree is a lookup, and the forest's
// probability is the mean over trees.
//
// Nodes live in a flat Vec and refer to children by index,
// which keeps the tree trivially serialisable.

use rand::{rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

/// Values closer than this are treated as equal when looking for thresholds
const FEATURE_EPSILON: f64 = 1e-7;

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth; `None` grows until leaves are pure
    pub max_depth: Option<usize>,
    /// A node with fewer samples than this becomes a leaf
    pub min_samples_split: usize,
    /// Non-constant features examined per split
    pub max_features: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: usize::MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        distribution: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

/// Training data borrowed by the builder while a tree grows.
struct TreeBuilder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [usize],
    n_features: usize,
    n_classes: usize,
    params: TreeParams,
    nodes: Vec<Node>,
}

struct SplitChoice {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// Grow a tree on the rows listed in `samples`.
    ///
    /// `samples` may repeat rows (bootstrap sampling); repeats count
    /// as extra weight. `y[i]` is the class index of row `i`.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[usize],
        samples: Vec<usize>,
        n_classes: usize,
        params: TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let n_features = x.first().map_or(0, Vec::len);
        let mut builder = TreeBuilder {
            x,
            y,
            n_features,
            n_classes,
            params,
            nodes: Vec::new(),
        };
        builder.grow(samples, 0, rng);

        Self {
            nodes: builder.nodes,
            n_classes,
        }
    }

    /// Class distribution of the leaf `features` lands in.
    /// Missing feature positions read as 0.0.
    pub fn predict_proba(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    idx = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn depth_of(nodes: &[Node], idx: usize) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => {
                    1 + depth_of(nodes, *left).max(depth_of(nodes, *right))
                }
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            depth_of(&self.nodes, 0)
        }
    }

    /// Structural check for trees read back from disk: children in
    /// range and pointing forward, leaves sized to the class count,
    /// split features below `n_features`.
    pub(crate) fn is_consistent(&self, n_features: usize) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(i, node)| match node {
                Node::Leaf { distribution } => distribution.len() == self.n_classes,
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    *feature < n_features
                        && *left > i
                        && *right > i
                        && *left < self.nodes.len()
                        && *right < self.nodes.len()
                }
            })
    }
}

impl<'a> TreeBuilder<'a> {
    /// Grow the subtree for `samples` and return its root index.
    fn grow(&mut self, samples: Vec<usize>, depth: usize, rng: &mut StdRng) -> usize {
        let counts = self.class_counts(&samples);
        let n = samples.len();

        let pure = counts.iter().any(|&c| c == n);
        let too_small = n < self.params.min_samples_split;
        let too_deep = self.params.max_depth.is_some_and(|d| depth >= d);

        if pure || too_small || too_deep {
            return self.push_leaf(&counts, n);
        }

        let Some(choice) = self.best_split(&samples, &counts, rng) else {
            return self.push_leaf(&counts, n);
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&s| self.x[s][choice.feature] <= choice.threshold);

        tracing::trace!(
            "split depth={} feature={} threshold={:.4} gini={:.4} ({} | {})",
            depth,
            choice.feature,
            choice.threshold,
            choice.impurity,
            left.len(),
            right.len(),
        );

        // Reserve the slot so children get larger indices
        let idx = self.nodes.len();
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });

        let left_idx = self.grow(left, depth + 1, rng);
        let right_idx = self.grow(right, depth + 1, rng);

        self.nodes[idx] = Node::Split {
            feature: choice.feature,
            threshold: choice.threshold,
            left: left_idx,
            right: right_idx,
        };
        idx
    }

    fn best_split(
        &self,
        samples: &[usize],
        parent_counts: &[usize],
        rng: &mut StdRng,
    ) -> Option<SplitChoice> {
        let n = samples.len();
        let mut features: Vec<usize> = (0..self.n_features).collect();
        features.shuffle(rng);

        let mut best: Option<SplitChoice> = None;
        let mut visited = 0usize;
        let mut pairs: Vec<(f64, usize)> = Vec::with_capacity(n);

        for feature in features {
            if visited >= self.params.max_features {
                break;
            }

            pairs.clear();
            pairs.extend(samples.iter().map(|&s| (self.x[s][feature], self.y[s])));
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            // Constant at this node: nothing to split on
            if pairs[n - 1].0 <= pairs[0].0 + FEATURE_EPSILON {
                continue;
            }
            visited += 1;

            let mut left = vec![0usize; self.n_classes];
            let mut right = parent_counts.to_vec();

            for i in 0..n - 1 {
                let (value, class) = pairs[i];
                left[class] += 1;
                right[class] -= 1;

                let next = pairs[i + 1].0;
                if next <= value + FEATURE_EPSILON {
                    continue;
                }

                let n_left = i + 1;
                let n_right = n - n_left;
                let impurity = (n_left as f64 * gini(&left, n_left)
                    + n_right as f64 * gini(&right, n_right))
                    / n as f64;

                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    best = Some(SplitChoice {
                        feature,
                        threshold: value + (next - value) / 2.0,
                        impurity,
                    });
                }
            }
        }

        best
    }

    fn class_counts(&self, samples: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &s in samples {
            counts[self.y[s]] += 1;
        }
        counts
    }

    fn push_leaf(&mut self, counts: &[usize], n: usize) -> usize {
        let total = n.max(1) as f64;
        let distribution = counts.iter().map(|&c| c as f64 / total).collect();
        self.nodes.push(Node::Leaf { distribution });
        self.nodes.len() - 1
    }
}

/// Gini impurity of a class histogram with `n` samples.
fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn fit_all(x: &[Vec<f64>], y: &[usize], n_classes: usize, params: TreeParams) -> DecisionTree {
        let mut rng = StdRng::seed_from_u64(42);
        DecisionTree::fit(x, y, (0..x.len()).collect(), n_classes, params, &mut rng)
    }

    fn argmax(p: &[f64]) -> usize {
        let mut best = 0;
        for (i, &v) in p.iter().enumerate() {
            if v > p[best] {
                best = i;
            }
        }
        best
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[4, 0], 4), 0.0);
        assert!((gini(&[2, 2], 4) - 0.5).abs() < 1e-12);
        assert_eq!(gini(&[0, 0], 0), 0.0);
    }

    #[test]
    fn test_perfect_fit_on_separable_data() {
        let x = vec![vec![0.0], vec![1.0], vec![10.0], vec![11.0]];
        let y = vec![0, 0, 1, 1];
        let tree = fit_all(&x, &y, 2, TreeParams::default());

        for (row, &label) in x.iter().zip(&y) {
            assert_eq!(argmax(tree.predict_proba(row)), label);
        }
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_pure_node_is_a_single_leaf() {
        let x = vec![vec![0.0, 1.0], vec![5.0, 2.0]];
        let y = vec![1, 1];
        let tree = fit_all(&x, &y, 3, TreeParams::default());

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_proba(&[9.0, 9.0]), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_max_depth_zero_gives_class_frequencies() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![0, 0, 0, 1];
        let params = TreeParams {
            max_depth: Some(0),
            ..TreeParams::default()
        };
        let tree = fit_all(&x, &y, 2, params);
        assert_eq!(tree.predict_proba(&[0.0]), &[0.75, 0.25]);
    }

    #[test]
    fn test_constant_features_give_a_leaf() {
        let x = vec![vec![1.0], vec![1.0], vec![1.0]];
        let y = vec![0, 1, 1];
        let tree = fit_all(&x, &y, 2, TreeParams::default());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_bootstrap_repeats_act_as_weights() {
        let x = vec![vec![0.0], vec![1.0]];
        let y = vec![0, 1];
        let mut rng = StdRng::seed_from_u64(1);
        let params = TreeParams {
            max_depth: Some(0),
            ..TreeParams::default()
        };
        let tree = DecisionTree::fit(&x, &y, vec![0, 0, 0, 1], 2, params, &mut rng);
        assert_eq!(tree.predict_proba(&[0.0]), &[0.75, 0.25]);
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let x: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![(i % 5) as f64, (i % 3) as f64, (i % 7) as f64])
            .collect();
        let y: Vec<usize> = (0..20).map(|i| i % 3).collect();
        let params = TreeParams {
            max_features: 1,
            ..TreeParams::default()
        };
        assert_eq!(fit_all(&x, &y, 3, params), fit_all(&x, &y, 3, params));
    }

    #[test]
    fn test_short_feature_vector_reads_zero() {
        let x = vec![vec![0.0, 0.0], vec![0.0, 1.0]];
        let y = vec![0, 1];
        let tree = fit_all(&x, &y, 2, TreeParams::default());
        assert_eq!(argmax(tree.predict_proba(&[])), 0);
    }

    #[test]
    fn test_fitted_tree_is_consistent() {
        let x = vec![vec![0.0], vec![1.0], vec![10.0], vec![11.0]];
        let y = vec![0, 1, 0, 1];
        let tree = fit_all(&x, &y, 2, TreeParams::default());
        assert!(tree.is_consistent(1));
        assert!(!tree.is_consistent(0));
    }
}
