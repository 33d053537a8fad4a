// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Filesystem concerns shared by the train and predict flows:
//
//   checkpoint.rs — ArtifactStore: saves the vectorizer and
//                   classifier as an atomic pair, plus the
//                   training config and symptom vocabulary.
//                   Implements ModelStore for the engine.
//
//   metrics.rs    — Appends per-run training metrics to a CSV.

/// Artifact persistence and the ModelStore seam
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
