// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits, not
// against the CSV loader or the random forest directly:
//
//   DatasetSource    — CsvDatasetLoader reads a labelled CSV;
//                      tests feed records from memory
//   SymptomPredictor — InferenceEngine ranks diseases;
//                      tests substitute a canned ranking
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::{prediction::RankedDisease, record::DatasetRecord};
use crate::error::Result;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Anything that can produce the labelled training rows.
pub trait DatasetSource {
    /// Load every record. All records must share one width.
    fn load_all(&self) -> Result<Vec<DatasetRecord>>;
}

// ─── SymptomPredictor ─────────────────────────────────────────────────────────
/// Anything that can rank diseases for a set of symptoms.
pub trait SymptomPredictor {
    /// Rank the most likely diseases, highest confidence first.
    /// An empty symptom list is an error, never a guess.
    fn predict(&self, symptoms: &[String]) -> Result<Vec<RankedDisease>>;
}
