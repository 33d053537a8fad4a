// ============================================================
// Layer 4 — Train/Evaluation Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into:
//   - Training set:   used to fit the forest
//   - Evaluation set: used to report accuracy on unseen rows
//
// The shuffle is driven by `StdRng::seed_from_u64(seed)`, so the
// same dataset and seed always give the same partitions and the
// reported accuracy is reproducible.
//
// Split size: n_eval = ceil(n * eval_fraction), clamped so at
// least one row is left for training.
//
// Reference: rand crate documentation (SeedableRng, SliceRandom)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (train, eval).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `eval_fraction` - Proportion held out, e.g. 0.2 = 20%
/// * `seed`          - Seed for the shuffle
pub fn split_train_eval<T>(mut samples: Vec<T>, eval_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total = samples.len();
    let eval_fraction = eval_fraction.clamp(0.0, 1.0);
    let n_eval = ((total as f64) * eval_fraction).ceil() as usize;
    let n_eval = n_eval.min(total.saturating_sub(1));

    // split_off(n) leaves [0..n] in `samples` and returns [n..total]
    let eval = samples.split_off(total - n_eval);

    tracing::debug!(
        "Dataset split: {} training, {} evaluation (seed {})",
        samples.len(),
        eval.len(),
        seed,
    );

    (samples, eval)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, eval) = split_train_eval(items, 0.2, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(eval.len(), 20);
    }

    #[test]
    fn test_eval_size_rounds_up() {
        let items: Vec<usize> = (0..11).collect();
        let (train, eval) = split_train_eval(items, 0.2, 42);
        assert_eq!(eval.len(), 3);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, eval) = split_train_eval(items, 0.3, 7);
        let mut all: Vec<usize> = train.into_iter().chain(eval).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_eval((0..40).collect::<Vec<usize>>(), 0.2, 42);
        let b = split_train_eval((0..40).collect::<Vec<usize>>(), 0.2, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_keeps_one_training_row() {
        let (train, eval) = split_train_eval(vec![1usize], 0.2, 42);
        assert_eq!(train, vec![1]);
        assert!(eval.is_empty());
    }

    #[test]
    fn test_zero_fraction_keeps_everything() {
        let (train, eval) = split_train_eval((0..10).collect::<Vec<usize>>(), 0.0, 1);
        assert_eq!(train.len(), 10);
        assert!(eval.is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let (train, eval) = split_train_eval(Vec::<usize>::new(), 0.2, 42);
        assert!(train.is_empty());
        assert!(eval.is_empty());
    }
}
