// ============================================================
// Layer 5 — Inference Engine
// ============================================================
// Ranks diseases for a set of symptoms using a frozen
// vectorizer/classifier pair.
//
// States:
//   Unloaded — loading failed; every predict() returns the
//              ArtifactLoad error that caused it
//   Ready    — artifacts loaded, immutable for the engine's life
//
// The transition happens once, in the constructor. There is no
// global model: whoever builds the engine chooses the
// ModelStore, and the engine is Send + Sync so callers can
// share one instance (e.g. behind an Arc) and call predict()
// concurrently without locking.
//
// predict():
//   1. Normalise tokens, drop missing markers, dedupe (sorted set)
//   2. Empty set → EmptyInput
//   3. Join with the shared joiner, transform (never refit)
//   4. predict_proba → top-K by probability, ties by class index
//   5. Probability → percentage with 2 decimals

use std::collections::BTreeSet;

use crate::data::preprocessor::{join_symptoms, normalize_token};
use crate::domain::prediction::RankedDisease;
use crate::domain::traits::SymptomPredictor;
use crate::error::{Result, SymptomError};
use crate::infra::checkpoint::ModelStore;
use crate::ml::TrainedArtifacts;

/// How many diseases a prediction returns unless configured otherwise
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug)]
enum EngineState {
    Unloaded { reason: String },
    Ready(TrainedArtifacts),
}

#[derive(Debug)]
pub struct InferenceEngine {
    state: EngineState,
    top_k: usize,
}

impl InferenceEngine {
    /// Load from `store`. A failure is logged and leaves the engine
    /// `Unloaded`; use [`InferenceEngine::try_load`] to get the error
    /// up front instead.
    pub fn load(store: &dyn ModelStore) -> Self {
        let state = match store.load() {
            Ok(artifacts) => EngineState::Ready(artifacts),
            Err(e) => {
                tracing::error!("Inference engine not ready: {e}");
                EngineState::Unloaded {
                    reason: e.to_string(),
                }
            }
        };
        Self {
            state,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Load from `store`, surfacing any load failure immediately.
    pub fn try_load(store: &dyn ModelStore) -> Result<Self> {
        Ok(Self::from_artifacts(store.load()?))
    }

    pub fn from_artifacts(artifacts: TrainedArtifacts) -> Self {
        Self {
            state: EngineState::Ready(artifacts),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Return at most `k` diseases per prediction (minimum 1).
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k.max(1);
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    /// The closed label set, in the classifier's class order.
    pub fn classes(&self) -> Result<&[String]> {
        Ok(self.artifacts()?.classifier().classes())
    }

    /// Feature vector for a symptom set, exactly as predict() sees it.
    pub fn encode<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<Vec<f64>> {
        let artifacts = self.artifacts()?;
        let text = symptom_text(symptoms)?;
        Ok(artifacts.vectorizer().transform(&text))
    }

    /// Rank the most likely diseases for `symptoms`, highest first.
    pub fn predict<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<Vec<RankedDisease>> {
        let artifacts = self.artifacts()?;
        let text = symptom_text(symptoms)?;

        let features = artifacts.vectorizer().transform(&text);
        let classifier = artifacts.classifier();
        let proba = classifier.predict_proba(&features);

        let ranked = rank(classifier.classes(), &proba, self.top_k);

        tracing::debug!("Predicted for '{}': {:?}", text, ranked);
        Ok(ranked)
    }

    fn artifacts(&self) -> Result<&TrainedArtifacts> {
        match &self.state {
            EngineState::Ready(artifacts) => Ok(artifacts),
            EngineState::Unloaded { reason } => Err(SymptomError::artifact_load(format!(
                "model not loaded: {reason}"
            ))),
        }
    }
}

impl SymptomPredictor for InferenceEngine {
    fn predict(&self, symptoms: &[String]) -> Result<Vec<RankedDisease>> {
        InferenceEngine::predict(self, symptoms)
    }
}

/// The `k` most probable classes, highest first.
fn rank(classes: &[String], proba: &[f64], k: usize) -> Vec<RankedDisease> {
    // Stable sort: equal probabilities keep class-index order
    let mut order: Vec<usize> = (0..proba.len()).collect();
    order.sort_by(|&a, &b| proba[b].total_cmp(&proba[a]));

    order
        .into_iter()
        .take(k)
        .map(|i| RankedDisease::from_probability(classes[i].clone(), proba[i]))
        .collect()
}

/// Normalise, dedupe and join the input; empty input is an error.
fn symptom_text<S: AsRef<str>>(symptoms: &[S]) -> Result<String> {
    let set: BTreeSet<String> = symptoms
        .iter()
        .map(|s| normalize_token(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();

    if set.is_empty() {
        return Err(SymptomError::EmptyInput);
    }
    Ok(join_symptoms(&set))
}
