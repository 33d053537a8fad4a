// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the CSV file on disk and the text strings
// the vectorizer consumes.
//
//   dataset.csv
//       │
//       ▼
//   CsvDatasetLoader  → fixed-width rows, missing markers blanked
//       │
//       ▼
//   preprocessor      → shared encoding convention (normalise, join)
//       │
//       ├──► SymptomVocabulary → distinct symptoms for the CLI
//       ▼
//   splitter          → seeded train / evaluation partitions
//
// Each module is responsible for exactly one step.

/// Reads the labelled CSV dataset
pub mod loader;

/// Shared symptom normalisation and joining convention
pub mod preprocessor;

/// Seeded train/evaluation split
pub mod splitter;

/// Distinct symptoms observed in the dataset
pub mod vocabulary;
