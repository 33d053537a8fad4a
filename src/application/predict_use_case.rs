// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Ranks diseases for the symptoms a user selected.
//
//   - Builds the InferenceEngine once, from the artifact store
//   - Warns (but does not fail) on symptoms outside the
//     training vocabulary; the model gives them zero weight
//   - Rejects an empty selection before touching the model

use anyhow::{Context, Result};

use crate::data::vocabulary::SymptomVocabulary;
use crate::domain::prediction::RankedDisease;
use crate::domain::traits::SymptomPredictor;
use crate::infra::checkpoint::ArtifactStore;
use crate::ml::inferencer::InferenceEngine;

pub struct PredictUseCase<P: SymptomPredictor> {
    predictor: P,
    vocabulary: Option<SymptomVocabulary>,
}

impl PredictUseCase<InferenceEngine> {
    /// Load the engine and vocabulary from an artifact directory.
    /// A missing or broken model fails here, at startup.
    pub fn from_artifact_dir(artifact_dir: &str, top_k: usize) -> Result<Self> {
        let store = ArtifactStore::new(artifact_dir);
        let engine = InferenceEngine::try_load(&store)
            .with_context(|| format!("Cannot load model from '{artifact_dir}'"))?
            .with_top_k(top_k);

        // The vocabulary only drives warnings, so a missing file is not fatal
        let vocabulary = match store.load_vocabulary() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Symptom vocabulary unavailable: {e}");
                None
            }
        };

        Ok(Self::new(engine, vocabulary))
    }
}

impl<P: SymptomPredictor> PredictUseCase<P> {
    pub fn new(predictor: P, vocabulary: Option<SymptomVocabulary>) -> Self {
        Self {
            predictor,
            vocabulary,
        }
    }

    pub fn predict(&self, symptoms: &[String]) -> Result<Vec<RankedDisease>> {
        if let Some(vocabulary) = &self.vocabulary {
            for unknown in vocabulary.unknown(symptoms) {
                tracing::warn!("Unknown symptom '{unknown}' will be ignored by the model");
            }
        }

        let ranked = self
            .predictor
            .predict(symptoms)
            .context("Please select at least one known symptom")?;
        Ok(ranked)
    }
}
