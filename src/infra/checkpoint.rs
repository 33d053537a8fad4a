// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores everything a training run produces.
//
// Directory layout:
//   artifacts/
//     vectorizer.bin            ← TF-IDF state (bincode)
//     classifier.bin            ← random forest (bincode)
//     train_config.json         ← settings the run used
//     symptom_vocabulary.json   ← selectable symptoms
//     metrics.csv               ← one row per run (metrics.rs)
//
// The two .bin files are one unit. They are serialised fully
// in memory first, written to temp files in the same directory,
// and only then renamed into place, so no file is ever half
// written. The two renames are separate steps, so each file
// also carries the same random pair id. If a run fails between
// the renames, the files on disk disagree on the id and `load`
// rejects them instead of mixing two runs.
//
// Loading goes through the `ModelStore` trait. The inference
// engine only knows the trait, so tests can hand it an
// in-memory store instead of a directory.
//
// Reference: bincode / tempfile crate documentation

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::application::train_use_case::TrainConfig;
use crate::data::vocabulary::SymptomVocabulary;
use crate::error::{Result, SymptomError};
use crate::ml::forest::RandomForest;
use crate::ml::vectorizer::TfidfVectorizer;
use crate::ml::TrainedArtifacts;

pub const VECTORIZER_FILE: &str = "vectorizer.bin";
pub const CLASSIFIER_FILE: &str = "classifier.bin";
pub const CONFIG_FILE: &str = "train_config.json";
pub const VOCABULARY_FILE: &str = "symptom_vocabulary.json";

// ─── ModelStore ───────────────────────────────────────────────────────────────
/// Source of a trained vectorizer/classifier pair.
pub trait ModelStore {
    /// Read the pair. Missing, corrupt or mismatched state is an
    /// `ArtifactLoad` error.
    fn load(&self) -> Result<TrainedArtifacts>;
}

/// On-disk envelope for one half of the pair.
#[derive(Serialize)]
struct PairedRef<'a, T> {
    pair_id: u64,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Paired<T> {
    pair_id: u64,
    payload: T,
}

/// Filesystem-backed artifact directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist the vectorizer and classifier as a pair.
    pub fn save_artifacts(&self, artifacts: &TrainedArtifacts) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let pair_id: u64 = rand::random();
        let vectorizer = bincode::serialize(&PairedRef {
            pair_id,
            payload: artifacts.vectorizer(),
        })
        .map_err(to_io)?;
        let classifier = bincode::serialize(&PairedRef {
            pair_id,
            payload: artifacts.classifier(),
        })
        .map_err(to_io)?;

        let vec_tmp = self.stage(&vectorizer)?;
        let clf_tmp = self.stage(&classifier)?;
        vec_tmp
            .persist(self.dir.join(VECTORIZER_FILE))
            .map_err(|e| e.error)?;
        clf_tmp
            .persist(self.dir.join(CLASSIFIER_FILE))
            .map_err(|e| e.error)?;

        tracing::info!(
            "Saved {} and {} to '{}'",
            VECTORIZER_FILE,
            CLASSIFIER_FILE,
            self.dir.display()
        );
        Ok(())
    }

    /// Save the training configuration as pretty JSON.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.save_json(CONFIG_FILE, cfg)
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        self.load_json(CONFIG_FILE)
    }

    pub fn save_vocabulary(&self, vocabulary: &SymptomVocabulary) -> Result<()> {
        self.save_json(VOCABULARY_FILE, vocabulary)
    }

    pub fn load_vocabulary(&self) -> Result<SymptomVocabulary> {
        self.load_json(VOCABULARY_FILE)
    }

    /// Write `bytes` to a temp file inside the artifact directory.
    fn stage(&self, bytes: &[u8]) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        Ok(tmp)
    }

    fn save_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
        let tmp = self.stage(json.as_bytes())?;
        tmp.persist(self.dir.join(name)).map_err(|e| e.error)?;
        tracing::debug!("Saved '{}'", self.dir.join(name).display());
        Ok(())
    }

    fn load_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path).map_err(|e| {
            SymptomError::artifact_load(format!(
                "cannot read '{}': {e}. Have you run 'train' first?",
                path.display()
            ))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            SymptomError::artifact_load(format!("cannot parse '{}': {e}", path.display()))
        })
    }

    fn load_bincode<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let bytes = fs::read(&path).map_err(|e| {
            SymptomError::artifact_load(format!(
                "cannot read '{}': {e}. Have you run 'train' first?",
                path.display()
            ))
        })?;
        bincode::deserialize(&bytes).map_err(|e| {
            SymptomError::artifact_load(format!("cannot decode '{}': {e}", path.display()))
        })
    }
}

impl ModelStore for ArtifactStore {
    fn load(&self) -> Result<TrainedArtifacts> {
        let vectorizer: Paired<TfidfVectorizer> = self.load_bincode(VECTORIZER_FILE)?;
        let classifier: Paired<RandomForest> = self.load_bincode(CLASSIFIER_FILE)?;
        if vectorizer.pair_id != classifier.pair_id {
            return Err(SymptomError::artifact_load(format!(
                "{VECTORIZER_FILE} and {CLASSIFIER_FILE} in '{}' come from different training runs",
                self.dir.display()
            )));
        }
        let artifacts = TrainedArtifacts::new(vectorizer.payload, classifier.payload)?;

        tracing::info!(
            "Loaded model from '{}': {} features, {} classes",
            self.dir.display(),
            artifacts.vectorizer().dimension(),
            artifacts.classifier().classes().len()
        );
        Ok(artifacts)
    }
}

fn to_io(e: bincode::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::DatasetRecord;
    use crate::ml::forest::ForestConfig;

    fn artifacts(docs: &[&str], labels: &[&str]) -> TrainedArtifacts {
        let (vectorizer, x) = TfidfVectorizer::fit_transform(docs);
        let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        let cfg = ForestConfig {
            n_estimators: 5,
            ..ForestConfig::default()
        };
        let forest = RandomForest::fit(&x, &labels, &cfg).unwrap();
        TrainedArtifacts::new(vectorizer, forest).unwrap()
    }

    #[test]
    fn test_artifacts_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let saved = artifacts(&["fever cough", "sneeze"], &["Flu", "Cold"]);

        store.save_artifacts(&saved).unwrap();
        assert!(dir.path().join(VECTORIZER_FILE).exists());
        assert!(dir.path().join(CLASSIFIER_FILE).exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_missing_directory_is_artifact_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("never-trained"));
        assert!(matches!(store.load(), Err(SymptomError::ArtifactLoad(_))));
    }

    #[test]
    fn test_corrupt_file_is_artifact_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        store
            .save_artifacts(&artifacts(&["fever", "sneeze"], &["Flu", "Cold"]))
            .unwrap();
        fs::write(dir.path().join(CLASSIFIER_FILE), b"not a forest").unwrap();

        assert!(matches!(store.load(), Err(SymptomError::ArtifactLoad(_))));
    }

    #[test]
    fn test_mismatched_pair_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = ArtifactStore::new(dir.path().join("a"));
        let b = ArtifactStore::new(dir.path().join("b"));
        a.save_artifacts(&artifacts(&["fever cough", "sneeze"], &["Flu", "Cold"]))
            .unwrap();
        b.save_artifacts(&artifacts(&["headache", "rash itch blister"], &["Migraine", "Pox"]))
            .unwrap();

        // Pair a's vectorizer (3 terms) with b's classifier (4 terms)
        fs::copy(dir.path().join("b").join(CLASSIFIER_FILE), dir.path().join("a").join(CLASSIFIER_FILE))
            .unwrap();
        assert!(matches!(a.load(), Err(SymptomError::ArtifactLoad(_))));
    }

    #[test]
    fn test_same_sized_pairs_from_two_runs_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = ArtifactStore::new(dir.path().join("a"));
        let b = ArtifactStore::new(dir.path().join("b"));
        // Both vocabularies have 3 terms, so dimensions agree
        a.save_artifacts(&artifacts(&["fever cough", "sneeze"], &["Flu", "Cold"]))
            .unwrap();
        b.save_artifacts(&artifacts(&["rash itch", "headache"], &["Pox", "Migraine"]))
            .unwrap();

        fs::copy(dir.path().join("b").join(VECTORIZER_FILE), dir.path().join("a").join(VECTORIZER_FILE))
            .unwrap();
        assert!(matches!(a.load(), Err(SymptomError::ArtifactLoad(_))));
    }

    #[test]
    fn test_failed_second_rename_does_not_load_a_mixed_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let first = artifacts(&["fever cough", "sneeze"], &["Flu", "Cold"]);
        store.save_artifacts(&first).unwrap();
        let old_classifier = fs::read(dir.path().join(CLASSIFIER_FILE)).unwrap();

        // A non-empty directory in the classifier's place makes its rename fail
        let blocked = dir.path().join(CLASSIFIER_FILE);
        fs::remove_file(&blocked).unwrap();
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("keep"), b"x").unwrap();

        let second = artifacts(&["rash itch", "headache"], &["Pox", "Migraine"]);
        assert!(store.save_artifacts(&second).is_err());

        // Put the previous run's classifier back next to the new vectorizer
        fs::remove_dir_all(&blocked).unwrap();
        fs::write(&blocked, old_classifier).unwrap();

        assert!(matches!(store.load(), Err(SymptomError::ArtifactLoad(_))));
    }

    #[test]
    fn test_config_and_vocabulary_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let cfg = TrainConfig {
            n_estimators: 7,
            ..TrainConfig::default()
        };
        store.save_config(&cfg).unwrap();
        assert_eq!(store.load_config().unwrap(), cfg);

        let vocab = SymptomVocabulary::from_records(&[DatasetRecord::new(
            "Flu",
            vec!["fever".into(), "".into()],
        )]);
        store.save_vocabulary(&vocab).unwrap();
        assert_eq!(store.load_vocabulary().unwrap(), vocab);
    }
}
