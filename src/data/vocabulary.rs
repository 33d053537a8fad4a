// ============================================================
// Layer 4 — Symptom Vocabulary
// ============================================================
// The sorted set of every distinct symptom seen in the dataset.
// The CLI offers these as the selectable symptoms and warns
// when a user types something outside the set. The model does
// not depend on it: unknown symptoms simply get zero weight.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::preprocessor::normalize_token;
use crate::domain::record::DatasetRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomVocabulary {
    symptoms: BTreeSet<String>,
}

impl SymptomVocabulary {
    /// Collect every non-empty symptom slot across the records.
    pub fn from_records(records: &[DatasetRecord]) -> Self {
        let symptoms = records
            .iter()
            .flat_map(|r| r.present_symptoms())
            .map(str::to_string)
            .collect();
        Self { symptoms }
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Membership test on the normalised form of `symptom`
    pub fn contains(&self, symptom: &str) -> bool {
        self.symptoms.contains(&normalize_token(symptom))
    }

    /// Symptoms in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(String::as_str)
    }

    /// The inputs that are not part of the vocabulary (after normalisation).
    pub fn unknown<'a, S: AsRef<str>>(&self, input: &'a [S]) -> Vec<&'a str> {
        input
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| {
                let n = normalize_token(s);
                !n.is_empty() && !self.symptoms.contains(&n)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<DatasetRecord> {
        vec![
            DatasetRecord::new("Flu", vec!["fever".into(), "cough".into(), "".into()]),
            DatasetRecord::new("Cold", vec!["sneeze".into(), "cough".into(), "".into()]),
        ]
    }

    #[test]
    fn test_distinct_sorted_non_empty() {
        let v = SymptomVocabulary::from_records(&records());
        assert_eq!(v.iter().collect::<Vec<_>>(), vec!["cough", "fever", "sneeze"]);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_contains_normalises_input() {
        let v = SymptomVocabulary::from_records(&records());
        assert!(v.contains("  Fever "));
        assert!(!v.contains("headache"));
    }

    #[test]
    fn test_unknown_lists_only_outsiders() {
        let v = SymptomVocabulary::from_records(&records());
        let input = ["fever", "unicorn-bite", "None"];
        assert_eq!(v.unknown(&input), vec!["unicorn-bite"]);
    }
}
