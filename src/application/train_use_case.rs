// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full offline training run:
//
//   Step 1: Load the labelled CSV           (Layer 4 - data)
//   Step 2: Collect the symptom vocabulary  (Layer 4 - data)
//   Step 3: Encode, split, fit, evaluate    (Layer 5 - ml)
//   Step 4: Persist the artifact pair       (Layer 6 - infra)
//   Step 5: Save config + vocabulary        (Layer 6 - infra)
//   Step 6: Append run metrics              (Layer 6 - infra)
//
// If Step 1 fails nothing is written: artifacts from an earlier
// run stay untouched.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{loader::CsvDatasetLoader, vocabulary::SymptomVocabulary};
use crate::domain::traits::DatasetSource;
use crate::infra::{checkpoint::ArtifactStore, metrics::MetricsLogger};
use crate::ml::trainer::{run_training, TrainingReport};

// ─── Training Configuration ──────────────────────────────────────────────────
// Every knob of a training run. Saved next to the artifacts as
// train_config.json so a model can be traced back to its settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub dataset_path: String,
    pub artifact_dir: String,
    pub n_estimators: usize,
    pub seed: u64,
    pub eval_fraction: f64,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path: "cleaned_dataset.csv".to_string(),
            artifact_dir: "artifacts".to_string(),
            n_estimators: 100,
            seed: 42,
            eval_fraction: 0.2,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

impl TrainConfig {
    fn validate(&self) -> Result<()> {
        ensure!(self.n_estimators >= 1, "n_estimators must be at least 1");
        ensure!(
            (0.0..1.0).contains(&self.eval_fraction),
            "eval_fraction must be in [0, 1), got {}",
            self.eval_fraction
        );
        ensure!(self.min_samples_split >= 2, "min_samples_split must be at least 2");
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Train from the CSV file named in the config.
    pub fn execute(&self) -> Result<TrainingReport> {
        let loader = CsvDatasetLoader::new(&self.config.dataset_path);
        self.execute_with(&loader)
    }

    /// Train from any dataset source.
    pub fn execute_with(&self, source: &dyn DatasetSource) -> Result<TrainingReport> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load rows ─────────────────────────────────────────────────
        let records = source
            .load_all()
            .with_context(|| format!("Cannot load dataset '{}'", cfg.dataset_path))?;

        // ── Step 2: Symptom vocabulary ────────────────────────────────────────
        let vocabulary = SymptomVocabulary::from_records(&records);
        tracing::info!("Dataset has {} distinct symptoms", vocabulary.len());

        // ── Step 3: Encode, split, fit, evaluate ──────────────────────────────
        let outcome = run_training(&records, cfg).context("Training failed")?;

        // ── Step 4: Persist the artifact pair ─────────────────────────────────
        let store = ArtifactStore::new(&cfg.artifact_dir);
        store
            .save_artifacts(&outcome.artifacts)
            .with_context(|| format!("Cannot write artifacts to '{}'", cfg.artifact_dir))?;

        // ── Step 5: Config and vocabulary ─────────────────────────────────────
        store.save_config(cfg)?;
        store.save_vocabulary(&vocabulary)?;

        // ── Step 6: Metrics ───────────────────────────────────────────────────
        MetricsLogger::new(&cfg.artifact_dir)?.log(cfg.seed, &outcome.report)?;

        tracing::info!("Training complete");
        Ok(outcome.report)
    }
}
