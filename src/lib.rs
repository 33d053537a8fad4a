//! Symptom checker: rank likely diseases for a set of symptoms.
//!
//! Layers, outermost first:
//!
//! 1. [`cli`]         — argument parsing, printing, text report
//! 2. [`application`] — train and predict workflows
//! 3. [`domain`]      — records, ranked predictions, core traits
//! 4. [`data`]        — CSV loading, encoding convention, split
//! 5. [`ml`]          — TF-IDF, decision trees, random forest, engine
//! 6. [`infra`]       — artifact persistence, training metrics
//!
//! The output is an advisory probability ranking over a fixed label
//! set learned from a static dataset. It is not a medical diagnosis.

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ml;

pub use domain::prediction::RankedDisease;
pub use error::{Result, SymptomError};
pub use infra::checkpoint::{ArtifactStore, ModelStore};
pub use ml::inferencer::InferenceEngine;
