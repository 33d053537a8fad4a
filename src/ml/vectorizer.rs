// ============================================================
// Layer 5 — TF-IDF Vectorizer
// ============================================================
// Turns a joined symptom string into a fixed-length numeric
// vector. Fit once on the training corpus, then frozen: the
// inference engine only ever calls `transform` on the loaded
// copy, never `fit`.
//
// Term extraction:
//   lowercase, then every match of `\b\w\w+\b` is a term: a
//   maximal run of at least 2 Unicode word characters.
//   "skin_rash high-fever" → ["skin_rash", "high", "fever"]
//
// Weighting, for a document d and term t:
//   tf(t, d)  = raw count of t in d
//   idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//   w(t, d)   = tf × idf, then the vector is L2-normalised
//
// Vocabulary terms get indices in lexicographic order, so the
// same corpus always yields the same feature layout.
//
// A term that was never seen during fit has no index and is
// dropped by `transform`: it contributes zero weight.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Word runs of length >= 2; single characters are never terms
static TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("term pattern should be valid"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// term → feature index
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF weights from `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique: BTreeSet<String> = extract_terms(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // BTreeMap iterates in sorted order → lexicographic indices
        let n_docs = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        tracing::debug!("TF-IDF vocabulary fitted with {} terms", vocabulary.len());
        Self { vocabulary, idf }
    }

    /// Fit on `documents` and return their vectors in the same order.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<Vec<f64>>) {
        let vectorizer = Self::fit(documents);
        let vectors = documents
            .iter()
            .map(|d| vectorizer.transform(d.as_ref()))
            .collect();
        (vectorizer, vectors)
    }

    /// Encode one document in the frozen feature space.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut features = vec![0.0; self.idf.len()];

        for term in extract_terms(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                features[idx] += 1.0;
            }
        }

        for (value, idf) in features.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = features.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        features
    }

    /// Number of features every vector has
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Feature index of a term, if it was seen during fit
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Consistency check used when loading from disk.
    pub(crate) fn is_consistent(&self) -> bool {
        self.vocabulary.len() == self.idf.len()
            && self.vocabulary.values().all(|&i| i < self.idf.len())
    }
}

/// Split text into terms: lowercase runs of ≥2 word characters.
pub fn extract_terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
