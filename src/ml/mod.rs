// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All feature-space and classifier code lives here. Other layers
// only see `TrainedArtifacts`, `run_training` and
// `InferenceEngine`.
//
//   vectorizer.rs — TF-IDF feature space (fit once, then frozen)
//   tree.rs       — CART decision tree with Gini impurity
//   forest.rs     — bagged ensemble of trees, predict_proba
//   trainer.rs    — encode → split → fit → evaluate
//   inferencer.rs — Unloaded/Ready engine, top-K ranking

/// TF-IDF vectorizer
pub mod vectorizer;

/// Single classification tree
pub mod tree;

/// Random forest ensemble
pub mod forest;

/// Offline training pipeline
pub mod trainer;

/// Online ranking engine
pub mod inferencer;

use crate::error::{Result, SymptomError};
use forest::RandomForest;
use vectorizer::TfidfVectorizer;

/// The vectorizer/classifier pair produced by one training run.
///
/// Always loaded together; `new` refuses a pair whose feature
/// dimensions disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedArtifacts {
    vectorizer: TfidfVectorizer,
    classifier: RandomForest,
}

impl TrainedArtifacts {
    pub fn new(vectorizer: TfidfVectorizer, classifier: RandomForest) -> Result<Self> {
        if !vectorizer.is_consistent() {
            return Err(SymptomError::artifact_load("vectorizer state is corrupt"));
        }
        if !classifier.is_consistent() {
            return Err(SymptomError::artifact_load("classifier state is corrupt"));
        }
        if vectorizer.dimension() != classifier.n_features() {
            return Err(SymptomError::artifact_load(format!(
                "vectorizer produces {} features but classifier expects {}",
                vectorizer.dimension(),
                classifier.n_features()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &RandomForest {
        &self.classifier
    }
}
