// ============================================================
// Layer 5 — Training Pipeline
// ============================================================
// From labelled rows to a fitted vectorizer/classifier pair:
//
//   1. Join each row's symptoms into one string
//   2. Fit TF-IDF on the whole corpus and encode every row
//   3. Seeded 80/20 shuffle split
//   4. Fit the random forest on the training rows
//   5. Report accuracy on the held-out rows (informational)
//
// Nothing here touches the filesystem; persisting the result is
// the application layer's job.

use serde::{Deserialize, Serialize};

use crate::application::train_use_case::TrainConfig;
use crate::data::{preprocessor::join_symptoms, splitter::split_train_eval};
use crate::domain::record::DatasetRecord;
use crate::error::{Result, SymptomError};
use crate::ml::forest::{accuracy, ForestConfig, RandomForest};
use crate::ml::vectorizer::TfidfVectorizer;
use crate::ml::TrainedArtifacts;

/// Summary of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub train_rows: usize,
    pub eval_rows: usize,
    pub n_classes: usize,
    pub n_features: usize,
    pub n_trees: usize,
    /// Held-out accuracy in [0, 1]; `None` if no rows were held out
    pub accuracy: Option<f64>,
}

pub struct TrainingOutcome {
    pub artifacts: TrainedArtifacts,
    pub report: TrainingReport,
}

pub fn run_training(records: &[DatasetRecord], cfg: &TrainConfig) -> Result<TrainingOutcome> {
    if records.is_empty() {
        return Err(SymptomError::data_format("dataset has no data rows"));
    }

    // ── Encode ────────────────────────────────────────────────────────────────
    let texts: Vec<String> = records
        .iter()
        .map(|r| join_symptoms(r.present_symptoms()))
        .collect();
    let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&texts);
    tracing::info!(
        "Encoded {} rows into {} TF-IDF features",
        vectors.len(),
        vectorizer.dimension()
    );

    // ── Split ─────────────────────────────────────────────────────────────────
    let samples: Vec<(Vec<f64>, String)> = vectors
        .into_iter()
        .zip(records.iter().map(|r| r.disease.clone()))
        .collect();
    let (train, eval) = split_train_eval(samples, cfg.eval_fraction, cfg.seed);
    let (x_train, y_train): (Vec<Vec<f64>>, Vec<String>) = train.into_iter().unzip();
    let (x_eval, y_eval): (Vec<Vec<f64>>, Vec<String>) = eval.into_iter().unzip();

    // ── Fit ───────────────────────────────────────────────────────────────────
    let forest_cfg = ForestConfig {
        n_estimators: cfg.n_estimators,
        seed: cfg.seed,
        max_depth: cfg.max_depth,
        min_samples_split: cfg.min_samples_split,
    };
    let classifier = RandomForest::fit(&x_train, &y_train, &forest_cfg)?;

    // ── Evaluate ──────────────────────────────────────────────────────────────
    let acc = accuracy(&classifier, &x_eval, &y_eval);
    match acc {
        Some(a) => tracing::info!("Model accuracy on {} held-out rows: {:.2}", x_eval.len(), a),
        None => tracing::warn!("No rows held out; accuracy not measured"),
    }

    let report = TrainingReport {
        train_rows: x_train.len(),
        eval_rows: x_eval.len(),
        n_classes: classifier.classes().len(),
        n_features: classifier.n_features(),
        n_trees: classifier.n_trees(),
        accuracy: acc,
    };

    let artifacts = TrainedArtifacts::new(vectorizer, classifier)?;
    Ok(TrainingOutcome { artifacts, report })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<DatasetRecord> {
        let mut rows = Vec::new();
        for _ in 0..10 {
            rows.push(DatasetRecord::new("Flu", vec!["fever".into(), "cough".into(), "".into()]));
            rows.push(DatasetRecord::new("Cold", vec!["sneeze".into(), "".into(), "".into()]));
            rows.push(DatasetRecord::new(
                "Migraine",
                vec!["headache".into(), "nausea".into(), "".into()],
            ));
        }
        rows
    }

    fn config() -> TrainConfig {
        TrainConfig {
            n_estimators: 20,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_report_counts() {
        let outcome = run_training(&records(), &config()).unwrap();
        let r = &outcome.report;
        assert_eq!(r.train_rows + r.eval_rows, 30);
        assert_eq!(r.eval_rows, 6);
        assert_eq!(r.n_features, 5);
        assert_eq!(r.n_trees, 20);
        assert_eq!(r.n_classes, 3);
        assert!(r.accuracy.is_some());
    }

    #[test]
    fn test_training_is_reproducible() {
        let a = run_training(&records(), &config()).unwrap();
        let b = run_training(&records(), &config()).unwrap();
        assert_eq!(a.artifacts, b.artifacts);
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_separable_data_scores_perfectly() {
        let outcome = run_training(&records(), &config()).unwrap();
        assert_eq!(outcome.report.accuracy, Some(1.0));
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let err = run_training(&[], &config()).err().unwrap();
        assert!(matches!(err, SymptomError::DataFormat(_)));
    }
}
